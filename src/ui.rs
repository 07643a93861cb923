// UI layer: an interactive menu built with `dialoguer`. Prompts replace
// the form fields of a web page; API failures are logged and the menu
// keeps running.

use crate::controller::Controller;
use crate::error::ClientError;
use crate::models::{Credentials, ListQuery, PostForm, SearchFilters};
use crate::render::{paint, PostAction, Theme};
use anyhow::Result;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::error;

const MENU: [&str; 11] = [
    "Set API base URL",
    "List posts",
    "Search posts",
    "Open post",
    "Create post",
    "Register",
    "Login",
    "Logout",
    "Toggle dark mode",
    "Show current view",
    "Exit",
];

/// Main interactive menu. Restores the saved session, then runs a select
/// loop until the user chooses "Exit".
pub fn main_menu(mut ctl: Controller) -> Result<()> {
    let mut theme = Theme::default();

    ctl.restore();
    show(&ctl, theme);

    loop {
        let selection = Select::new()
            .with_prompt(menu_prompt(&ctl))
            .items(&MENU[..])
            .default(1)
            .interact()?;
        match selection {
            0 => handle_base_url(&mut ctl)?,
            1 => {
                let query = prompt_list_query(ctl.query())?;
                let pb = spinner("Loading posts...")?;
                let res = ctl.load_posts(query).map(|_| ());
                pb.finish_and_clear();
                report(res);
                show(&ctl, theme);
            }
            2 => {
                let filters = prompt_search()?;
                let pb = spinner("Searching...")?;
                let res = ctl.search(&filters).map(|_| ());
                pb.finish_and_clear();
                report(res);
                show(&ctl, theme);
            }
            3 => {
                if handle_open_post(&mut ctl)? {
                    show(&ctl, theme);
                }
            }
            4 => {
                if require_login(&ctl) {
                    let form = prompt_post_form(&PostForm::default())?;
                    report(ctl.create_post(&form));
                    show(&ctl, theme);
                }
            }
            5 => handle_register(&ctl)?,
            6 => handle_login(&mut ctl)?,
            7 => {
                ctl.logout();
                println!("Logged out.");
                show(&ctl, theme);
            }
            8 => {
                theme = theme.toggled();
                show(&ctl, theme);
            }
            9 => show(&ctl, theme),
            10 => break,
            _ => {}
        }
    }
    Ok(())
}

fn menu_prompt(ctl: &Controller) -> String {
    let base = ctl.session().api_base_url.as_deref().unwrap_or("no API set");
    match ctl.identity_line() {
        line if line.is_empty() => format!("[{}]", base),
        line => format!("[{}] {}", base, line),
    }
}

fn show(ctl: &Controller, theme: Theme) {
    print!("{}", paint(ctl.view(), theme));
}

/// Log a failed call the way a console would; nothing else changes.
fn report(res: std::result::Result<(), ClientError>) {
    if let Err(e) = res {
        error!("Error: {}", e);
    }
}

fn spinner(msg: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn require_login(ctl: &Controller) -> bool {
    if !ctl.session().has_token() {
        println!("You should login first.");
        return false;
    }
    true
}

fn handle_base_url(ctl: &mut Controller) -> Result<()> {
    let current = ctl.session().api_base_url.clone().unwrap_or_default();
    let url: String = Input::new()
        .with_prompt("API base URL")
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;
    ctl.set_base_url(&url);
    Ok(())
}

fn prompt_list_query(current: &ListQuery) -> Result<ListQuery> {
    let page = optional("Page", &current.page)?;
    let limit = optional("Limit", &current.limit)?;
    let sorts = ["(none)", "id", "title", "content"];
    let idx = Select::new()
        .with_prompt("Sort by")
        .items(&sorts[..])
        .default(sorts.iter().position(|s| *s == current.sort).unwrap_or(0))
        .interact()?;
    let sort = if idx == 0 { String::new() } else { sorts[idx].to_string() };
    let direction = if sort.is_empty() {
        current.direction.clone()
    } else {
        let dirs = ["(none)", "asc", "desc"];
        let idx = Select::new()
            .with_prompt("Direction")
            .items(&dirs[..])
            .default(dirs.iter().position(|d| *d == current.direction).unwrap_or(0))
            .interact()?;
        if idx == 0 { String::new() } else { dirs[idx].to_string() }
    };
    Ok(ListQuery {
        page,
        limit,
        sort,
        direction,
    })
}

fn prompt_search() -> Result<SearchFilters> {
    Ok(SearchFilters {
        title: optional("Title", "")?,
        author: optional("Author", "")?,
        category: optional("Category", "")?,
        tag: optional("Tag", "")?,
    })
}

/// One structured form for create and edit, prefilled from `current`.
fn prompt_post_form(current: &PostForm) -> Result<PostForm> {
    let title = text_field("Title", &current.title)?;
    let content = text_field("Content", &current.content)?;
    let category = text_field("Category", &current.category)?;
    let tags = text_field("Tags (comma separated)", &current.tags.join(", "))?;
    Ok(PostForm::from_input(&title, &content, &category, &tags))
}

/// Free text, sent exactly as typed.
fn text_field(prompt: &str, initial: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Query values, where surrounding whitespace is never meaningful.
fn optional(prompt: &str, initial: &str) -> Result<String> {
    Ok(text_field(prompt, initial)?.trim().to_string())
}

/// Pick a rendered post and one of its actions. Returns true when the
/// view should be printed again.
fn handle_open_post(ctl: &mut Controller) -> Result<bool> {
    if ctl.view().is_empty() {
        println!("No posts loaded.");
        return Ok(false);
    }
    let titles: Vec<String> = ctl
        .view()
        .iter()
        .map(|c| format!("#{} {}", c.id, c.heading))
        .collect();
    let idx = Select::new()
        .with_prompt("Post")
        .items(&titles)
        .default(0)
        .interact()?;
    let actions = ctl.view()[idx].actions;
    let mut labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
    labels.push("Back");
    let choice = Select::new().items(&labels).default(0).interact()?;
    let Some(action) = actions.get(choice).copied() else {
        return Ok(false);
    };
    if !require_login(ctl) {
        return Ok(false);
    }

    match action {
        PostAction::Delete(id) => {
            if !Confirm::new().with_prompt(format!("Delete post {}?", id)).interact()? {
                return Ok(false);
            }
            report(ctl.delete_post(id));
        }
        PostAction::Edit(id) => {
            let current = ctl
                .post(id)
                .map(|p| PostForm {
                    title: p.title.clone(),
                    content: p.content.clone(),
                    category: p.category.clone(),
                    tags: p.tags.clone(),
                })
                .unwrap_or_default();
            let form = prompt_post_form(&current)?;
            report(ctl.update_post(id, &form));
        }
        PostAction::AddComment(id) => {
            let text = text_field("Comment", "")?;
            report(ctl.add_comment(id, &text));
        }
    }
    Ok(true)
}

fn handle_register(ctl: &Controller) -> Result<()> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    // `Password` hides input in terminal for passwords.
    let password: String = Password::new().with_prompt("Password").interact()?;
    let creds = Credentials { username, password };

    let pb = spinner("Registering...")?;
    let res = ctl.register(&creds);
    pb.finish_and_clear();
    match res {
        Ok(()) => println!("User registered successfully."),
        Err(e) => error!("Error: {}", e),
    }
    Ok(())
}

fn handle_login(ctl: &mut Controller) -> Result<()> {
    let username: String = Input::new().with_prompt("Username").interact_text()?;
    let password: String = Password::new().with_prompt("Password").interact()?;
    let creds = Credentials { username, password };

    let pb = spinner("Logging in...")?;
    let res = ctl.login(&creds);
    pb.finish_and_clear();
    match res {
        Ok(_) => {
            println!("Login successful!");
            println!("{}", ctl.identity_line());
        }
        Err(ClientError::MissingToken { raw }) => println!("Login failed: {}", raw),
        Err(e) => error!("Error: {}", e),
    }
    Ok(())
}
