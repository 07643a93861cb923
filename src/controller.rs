// Client controller: owns the session and the current view, and wires
// each user operation to one API call. Every successful mutation is
// followed by a full reload of the post list.

use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Credentials, ListQuery, Post, PostForm, SearchFilters};
use crate::render::{render, PostCard};
use crate::session::{token_subject, Session, SessionStore};
use tracing::{error, info, warn};

pub struct Controller {
    api: ApiClient,
    store: SessionStore,
    session: Session,
    identity: Option<String>,
    query: ListQuery,
    posts: Vec<Post>,
    view: Vec<PostCard>,
}

impl Controller {
    /// Build a controller from the saved session. `fallback_base_url` is
    /// used only when the session file has no base URL.
    pub fn new(api: ApiClient, store: SessionStore, fallback_base_url: Option<&str>) -> Self {
        let mut session = store.load().unwrap_or_else(|e| {
            warn!("Ignoring unreadable session file: {}", e);
            Session::default()
        });
        if session.api_base_url.is_none() {
            if let Some(url) = fallback_base_url {
                session.set_base_url(url);
            }
        }
        Controller {
            api,
            store,
            session,
            identity: None,
            query: ListQuery::default(),
            posts: Vec::new(),
            view: Vec::new(),
        }
    }

    /// Startup: with a known base URL, load posts and restore the identity
    /// from a saved token.
    pub fn restore(&mut self) {
        if self.session.api_base_url.is_none() {
            return;
        }
        if let Err(e) = self.load_posts(ListQuery::default()) {
            error!("Error: {}", e);
        }
        self.show_identity_from_token();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Text of the "logged in" banner, empty when logged out.
    pub fn identity_line(&self) -> String {
        match &self.identity {
            Some(name) => format!("Logged in as: {}", name),
            None => String::new(),
        }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn view(&self) -> &[PostCard] {
        &self.view
    }

    /// Last fetched copy of a post, used to prefill the edit form.
    pub fn post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn set_base_url(&mut self, url: &str) {
        self.session.set_base_url(url);
        self.persist();
    }

    pub fn register(&self, creds: &Credentials) -> Result<()> {
        self.api.register(&self.session, creds)
    }

    /// Log in, store the token and return the displayed identity.
    pub fn login(&mut self, creds: &Credentials) -> Result<String> {
        let token = self.api.login(&self.session, creds)?;
        self.session.set_token(&token);
        self.persist();
        let name = token_subject(&token).unwrap_or_else(|e| {
            warn!("{}", e);
            creds.username.clone()
        });
        info!(user = %name, "logged in");
        self.identity = Some(name.clone());
        Ok(name)
    }

    /// Forget the token and identity, then reload the public list.
    pub fn logout(&mut self) {
        self.session.clear_token();
        self.identity = None;
        self.persist();
        self.reload();
    }

    /// Fetch posts with `query` and make the result the current view.
    /// The base URL is persisted on every listing.
    pub fn load_posts(&mut self, query: ListQuery) -> Result<&[PostCard]> {
        self.persist();
        self.query = query;
        let posts = self.api.list_posts(&self.session, &self.query)?;
        Ok(self.show(posts))
    }

    pub fn search(&mut self, filters: &SearchFilters) -> Result<&[PostCard]> {
        let posts = self.api.search_posts(&self.session, filters)?;
        Ok(self.show(posts))
    }

    pub fn create_post(&mut self, form: &PostForm) -> Result<()> {
        let created = self.api.create_post(&self.session, form)?;
        info!(id = created.id, "created post");
        self.reload();
        Ok(())
    }

    pub fn update_post(&mut self, id: i64, form: &PostForm) -> Result<()> {
        self.api.update_post(&self.session, id, form)?;
        info!(id, "updated post");
        self.reload();
        Ok(())
    }

    pub fn delete_post(&mut self, id: i64) -> Result<()> {
        self.api.delete_post(&self.session, id)?;
        info!(id, "deleted post");
        self.reload();
        Ok(())
    }

    /// Add a comment; blank text is not sent.
    pub fn add_comment(&mut self, id: i64, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.api.add_comment(&self.session, id, text)?;
        self.reload();
        Ok(())
    }

    /// Re-run the last listing. Failures leave the view unchanged.
    fn reload(&mut self) {
        let query = self.query.clone();
        if let Err(e) = self.load_posts(query) {
            error!("Error: {}", e);
        }
    }

    fn show(&mut self, posts: Vec<Post>) -> &[PostCard] {
        self.view = render(&posts);
        self.posts = posts;
        &self.view
    }

    fn show_identity_from_token(&mut self) {
        let Some(token) = self.session.jwt_token.as_deref() else {
            return;
        };
        match token_subject(token) {
            Ok(name) => self.identity = Some(name),
            Err(e) => warn!("{}", e),
        }
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.session) {
            error!("Could not save session to {}: {}", self.store.path().display(), e);
        }
    }
}

