// API client module: a small blocking HTTP client for the blog backend.
// Every call takes the `Session` explicitly so the caller owns the base
// URL and the token; the client itself only holds the connection pool.

use crate::error::{ClientError, Result};
use crate::models::{Credentials, ListQuery, NewComment, Post, PostForm, SearchFilters};
use crate::session::Session;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

/// Blocking client for the blog REST API.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(ApiClient { client })
    }

    /// Register a user by POSTing to /register. The response body is
    /// ignored; only the status matters.
    pub fn register(&self, session: &Session, creds: &Credentials) -> Result<()> {
        let url = endpoint(session, "/register", &[])?;
        let res = self.client.post(url).json(creds).send()?;
        check(res)?;
        info!(username = %creds.username, "registered user");
        Ok(())
    }

    /// Log in and return the access token. A body without `access_token`
    /// (or with an empty one) is reported with its raw JSON, whatever the
    /// status code.
    pub fn login(&self, session: &Session, creds: &Credentials) -> Result<String> {
        let url = endpoint(session, "/login", &[])?;
        let res = self.client.post(url).json(creds).send()?;
        let body = res.text()?;
        let data: serde_json::Value = serde_json::from_str(&body)?;
        match data
            .get("access_token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
        {
            Some(token) => Ok(token.to_string()),
            None => Err(ClientError::MissingToken {
                raw: data.to_string(),
            }),
        }
    }

    /// GET /posts with whichever paging and ordering options are set.
    pub fn list_posts(&self, session: &Session, query: &ListQuery) -> Result<Vec<Post>> {
        let url = endpoint(session, "/posts", &query.to_pairs())?;
        debug!("Fetching posts from: {}", url);
        let res = self.client.get(url).send()?;
        read_json(res)
    }

    /// GET /posts/search with the non-empty filters.
    pub fn search_posts(&self, session: &Session, filters: &SearchFilters) -> Result<Vec<Post>> {
        let url = endpoint(session, "/posts/search", &filters.to_pairs())?;
        debug!("Searching posts: {}", url);
        let res = self.client.get(url).send()?;
        read_json(res)
    }

    pub fn create_post(&self, session: &Session, form: &PostForm) -> Result<Post> {
        let url = endpoint(session, "/posts", &[])?;
        let res = authed(self.client.post(url), session).json(form).send()?;
        read_json(res)
    }

    pub fn update_post(&self, session: &Session, id: i64, form: &PostForm) -> Result<Post> {
        let url = endpoint(session, &format!("/posts/{id}"), &[])?;
        let res = authed(self.client.put(url), session).json(form).send()?;
        read_json(res)
    }

    pub fn delete_post(&self, session: &Session, id: i64) -> Result<()> {
        let url = endpoint(session, &format!("/posts/{id}"), &[])?;
        let res = authed(self.client.delete(url), session).send()?;
        check(res)?;
        Ok(())
    }

    /// POST /posts/{id}/comments. The response body is not needed since
    /// the caller reloads the list afterwards.
    pub fn add_comment(&self, session: &Session, id: i64, text: &str) -> Result<()> {
        let url = endpoint(session, &format!("/posts/{id}/comments"), &[])?;
        let body = NewComment {
            text: text.to_string(),
        };
        let res = authed(self.client.post(url), session).json(&body).send()?;
        check(res)?;
        Ok(())
    }
}

/// Join the session's base URL with `path` and append query pairs.
/// No `?` is added when there are no pairs.
fn endpoint(session: &Session, path: &str, pairs: &[(&str, &str)]) -> Result<Url> {
    let mut url = Url::parse(&format!("{}{}", session.base_url()?, path))?;
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

fn authed(req: RequestBuilder, session: &Session) -> RequestBuilder {
    req.header(AUTHORIZATION, session.bearer())
}

fn check(res: Response) -> Result<Response> {
    let status = res.status();
    if !status.is_success() {
        let body = res.text().unwrap_or_else(|e| {
            debug!("Could not read error body: {}", e);
            String::new()
        });
        return Err(ClientError::Status { status, body });
    }
    Ok(res)
}

fn read_json<T: DeserializeOwned>(res: Response) -> Result<T> {
    let body = check(res)?.text()?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(base: &str) -> Session {
        let mut s = Session::default();
        s.set_base_url(base);
        s
    }

    #[test]
    fn endpoint_without_params_has_no_query() {
        let url = endpoint(&session("http://localhost:5002/api/"), "/posts", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5002/api/posts");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn endpoint_omits_sort_and_direction_when_sort_empty() {
        let query = ListQuery {
            page: "1".into(),
            direction: "desc".into(),
            ..Default::default()
        };
        let url = endpoint(&session("http://h/api"), "/posts", &query.to_pairs()).unwrap();
        assert_eq!(url.query(), Some("page=1"));
    }

    #[test]
    fn endpoint_encodes_search_values() {
        let filters = SearchFilters {
            title: "first post".into(),
            ..Default::default()
        };
        let url = endpoint(&session("http://h"), "/posts/search", &filters.to_pairs()).unwrap();
        assert_eq!(url.query(), Some("title=first+post"));
    }

    #[test]
    fn endpoint_requires_base_url() {
        assert!(matches!(
            endpoint(&Session::default(), "/posts", &[]),
            Err(ClientError::MissingBaseUrl)
        ));
        assert!(matches!(
            endpoint(&session("not a url"), "/posts", &[]),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
