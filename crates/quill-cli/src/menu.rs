//! The interactive session: login prompt, main menu, and the per-blog
//! editing menu. Everything here is presentation. Every operation goes
//! through the controller and every failure it returns is rendered from the
//! typed taxonomy.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::debug;

use quill_engine::{Controller, EngineConfig, EngineError};
use quill_types::{Blog, Post};

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(credentials) = cli.credentials {
        config.credentials_file = Some(credentials);
    }
    if cli.ephemeral {
        config.autosave = false;
    }

    let mut controller = Controller::open(config)?;
    debug!(
        data_dir = %controller.config().data_dir.display(),
        autosave = controller.config().autosave,
        "engine opened"
    );
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    if !login(&mut controller, &mut lines)? {
        return Ok(());
    }
    main_menu(&mut controller, &mut lines)?;
    Ok(())
}

type Lines<'a> = std::io::Lines<io::StdinLock<'a>>;

/// Prompt until a login succeeds. Returns `false` on end of input.
fn login(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<bool> {
    println!("{}", "QUILL — BLOGGING SYSTEM".bold());
    loop {
        let Some(username) = prompt(lines, "Username: ")? else {
            return Ok(false);
        };
        let Some(password) = prompt(lines, "Password: ")? else {
            return Ok(false);
        };
        match controller.login(&username, &password) {
            Ok(()) => {
                println!("{} logged in as {}\n", "✓".green().bold(), username.yellow());
                return Ok(true);
            }
            Err(e) => report(&e),
        }
    }
}

fn main_menu(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    loop {
        println!("\n{}", "MAIN MENU".bold());
        println!("1 - Add new blog");
        println!("2 - Search blog by id");
        println!("3 - Retrieve blogs by name");
        println!("4 - Change blog data");
        println!("5 - Remove blog");
        println!("6 - List all blogs");
        println!("7 - Open blog");
        println!("8 - Log out");

        let Some(choice) = prompt(lines, "\nChoose your option: ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => create_blog(controller, lines)?,
            "2" => search_blog(controller, lines)?,
            "3" => retrieve_blogs(controller, lines)?,
            "4" => update_blog(controller, lines)?,
            "5" => delete_blog(controller, lines)?,
            "6" => list_blogs(controller),
            "7" => open_blog(controller, lines)?,
            "8" => {
                match controller.logout() {
                    Ok(()) => println!("{} logged out", "✓".green()),
                    Err(e) => report(&e),
                }
                return Ok(());
            }
            _ => println!("Please pick a choice between 1 and 8."),
        }
    }
}

fn create_blog(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(id) = prompt_i64(lines, "Blog id: ")? else {
        return Ok(());
    };
    let (Some(name), Some(url), Some(email)) = (
        prompt(lines, "Blog name: ")?,
        prompt(lines, "Blog URL: ")?,
        prompt(lines, "Blog email: ")?,
    ) else {
        return Ok(());
    };
    match controller.create_blog(id, &name, &url, &email) {
        Ok(blog) => println!("{} added {}", "✓".green(), describe_blog(&blog)),
        Err(e) => report(&e),
    }
    Ok(())
}

fn search_blog(controller: &Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(id) = prompt_i64(lines, "Blog id: ")? else {
        return Ok(());
    };
    match controller.search_blog(id) {
        Ok(Some(blog)) => println!("{}", describe_blog(&blog)),
        Ok(None) => println!("no blog with id {id}"),
        Err(e) => report(&e),
    }
    Ok(())
}

fn retrieve_blogs(controller: &Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(needle) = prompt(lines, "Name contains: ")? else {
        return Ok(());
    };
    match controller.retrieve_blogs(&needle) {
        Ok(blogs) if blogs.is_empty() => println!("no blogs match {needle:?}"),
        Ok(blogs) => {
            for blog in &blogs {
                println!("{}", describe_blog(blog));
            }
        }
        Err(e) => report(&e),
    }
    Ok(())
}

fn update_blog(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(existing_id) = prompt_i64(lines, "Blog id to change: ")? else {
        return Ok(());
    };
    let Some(new_id) = prompt_i64(lines, "New id (repeat to keep): ")? else {
        return Ok(());
    };
    let (Some(name), Some(url), Some(email)) = (
        prompt(lines, "New name: ")?,
        prompt(lines, "New URL: ")?,
        prompt(lines, "New email: ")?,
    ) else {
        return Ok(());
    };
    match controller.update_blog(existing_id, new_id, &name, &url, &email) {
        Ok(blog) => println!("{} updated {}", "✓".green(), describe_blog(&blog)),
        Err(e) => report(&e),
    }
    Ok(())
}

fn delete_blog(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(id) = prompt_i64(lines, "Blog id to remove: ")? else {
        return Ok(());
    };
    match controller.delete_blog(id) {
        Ok(blog) => println!("{} removed {}", "✓".green(), blog.name.yellow()),
        Err(e) => report(&e),
    }
    Ok(())
}

fn list_blogs(controller: &Controller) {
    match controller.list_blogs() {
        Ok(blogs) if blogs.is_empty() => println!("no blogs registered"),
        Ok(blogs) => {
            for blog in &blogs {
                println!("{}", describe_blog(blog));
            }
        }
        Err(e) => report(&e),
    }
}

fn open_blog(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(id) = prompt_i64(lines, "Blog id to open: ")? else {
        return Ok(());
    };
    if let Err(e) = controller.set_current_blog(id) {
        report(&e);
        return Ok(());
    }
    editing_menu(controller, lines)?;
    if let Err(e) = controller.unset_current_blog() {
        report(&e);
    }
    Ok(())
}

fn editing_menu(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let title = match controller.get_current_blog() {
        Ok(Some(blog)) => blog.name,
        _ => String::from("?"),
    };
    loop {
        println!("\n{} {}", "EDITING".bold(), title.yellow().bold());
        println!("1 - Add new post");
        println!("2 - Search post by code");
        println!("3 - Retrieve posts by text");
        println!("4 - Change post");
        println!("5 - Remove post");
        println!("6 - List all posts");
        println!("7 - Close blog");

        let Some(choice) = prompt(lines, "\nChoose your option: ")? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => create_post(controller, lines)?,
            "2" => search_post(controller, lines)?,
            "3" => retrieve_posts(controller, lines)?,
            "4" => update_post(controller, lines)?,
            "5" => delete_post(controller, lines)?,
            "6" => list_posts(controller),
            "7" => return Ok(()),
            _ => println!("Please pick a choice between 1 and 7."),
        }
    }
}

fn create_post(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let (Some(title), Some(text)) = (
        prompt(lines, "Post title: ")?,
        prompt(lines, "Post text: ")?,
    ) else {
        return Ok(());
    };
    match controller.create_post(&title, &text) {
        Ok(post) => println!("{} added post #{}", "✓".green(), post.code),
        Err(e) => report(&e),
    }
    Ok(())
}

fn search_post(controller: &Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(code) = prompt_i64(lines, "Post code: ")? else {
        return Ok(());
    };
    match controller.search_post(code) {
        Ok(Some(post)) => print_post(&post),
        Ok(None) => println!("no post with code {code}"),
        Err(e) => report(&e),
    }
    Ok(())
}

fn retrieve_posts(controller: &Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(needle) = prompt(lines, "Title or text contains: ")? else {
        return Ok(());
    };
    match controller.retrieve_posts(&needle) {
        Ok(posts) if posts.is_empty() => println!("no posts match {needle:?}"),
        Ok(posts) => {
            for post in &posts {
                print_post(post);
            }
        }
        Err(e) => report(&e),
    }
    Ok(())
}

fn update_post(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(code) = prompt_i64(lines, "Post code to change: ")? else {
        return Ok(());
    };
    let (Some(title), Some(text)) = (
        prompt(lines, "New title: ")?,
        prompt(lines, "New text: ")?,
    ) else {
        return Ok(());
    };
    match controller.update_post(code, &title, &text) {
        Ok(post) => println!("{} updated post #{}", "✓".green(), post.code),
        Err(e) => report(&e),
    }
    Ok(())
}

fn delete_post(controller: &mut Controller, lines: &mut Lines) -> anyhow::Result<()> {
    let Some(code) = prompt_i64(lines, "Post code to remove: ")? else {
        return Ok(());
    };
    match controller.delete_post(code) {
        Ok(post) => println!("{} removed post #{}", "✓".green(), post.code),
        Err(e) => report(&e),
    }
    Ok(())
}

fn list_posts(controller: &Controller) {
    match controller.list_posts() {
        Ok(posts) if posts.is_empty() => println!("this blog has no posts"),
        Ok(posts) => {
            for post in &posts {
                print_post(post);
            }
        }
        Err(e) => report(&e),
    }
}

// ---- Rendering ----

fn describe_blog(blog: &Blog) -> String {
    format!(
        "{}  {}  ({}, {})",
        blog.id.to_string().cyan(),
        blog.name.yellow(),
        blog.url,
        blog.email
    )
}

fn print_post(post: &Post) {
    println!(
        "{}  {}  created {}  updated {}",
        format!("#{}", post.code).cyan(),
        post.title.yellow(),
        post.created_at.format("%Y-%m-%d %H:%M"),
        post.updated_at.format("%Y-%m-%d %H:%M"),
    );
    for line in post.text.lines() {
        println!("    {line}");
    }
}

fn report(err: &EngineError) {
    println!("{} {err}", "error:".red().bold());
}

// ---- Input ----

/// Print a prompt and read one trimmed line. `None` means end of input.
fn prompt(lines: &mut Lines, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

/// Like [`prompt`], re-asking until the input parses as an integer.
fn prompt_i64(lines: &mut Lines, label: &str) -> io::Result<Option<i64>> {
    loop {
        let Some(raw) = prompt(lines, label)? else {
            return Ok(None);
        };
        match raw.parse() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Please enter an integer number."),
        }
    }
}
