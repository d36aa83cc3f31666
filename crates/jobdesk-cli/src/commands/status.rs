use super::App;
use anyhow::Result;
use colored::Colorize;

pub async fn run(app: &mut App) -> Result<()> {
    let screen = app.start().await;

    println!("{:<8} {}", "api".bold(), app.http.base_url());
    match app.context.session() {
        Some(session) => println!("{:<8} {}", "user".bold(), session.user_id),
        None => println!("{:<8} {}", "user".bold(), "not signed in".dimmed()),
    }
    println!("{:<8} {}", "screen".bold(), screen);

    app.flush_notifications();
    Ok(())
}
