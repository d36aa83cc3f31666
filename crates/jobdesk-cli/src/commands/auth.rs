use super::App;
use crate::output;
use anyhow::Result;
use jobdesk_core::navigation::Screen;

pub async fn sign_in(app: &mut App, email: &str, password: &str) -> Result<()> {
    app.start().await;
    app.context.navigate(Screen::SignIn).await;

    let session = app.context.sign_in(email, password).await?;
    output::success(&format!("Signed in as user {}", session.user_id));
    print_job_count(app);
    app.flush_notifications();
    Ok(())
}

pub async fn sign_up(app: &mut App, email: &str, password: &str) -> Result<()> {
    app.start().await;
    app.context.navigate(Screen::SignUp).await;

    let session = app.context.sign_up(email, password).await?;
    output::success(&format!("Account created, signed in as user {}", session.user_id));
    print_job_count(app);
    app.flush_notifications();
    Ok(())
}

pub async fn sign_out(app: &mut App) -> Result<()> {
    app.start().await;
    app.context.sign_out().await;
    output::success("Signed out");
    Ok(())
}

pub async fn whoami(app: &mut App) -> Result<()> {
    app.start().await;
    match app.context.session() {
        Some(session) => println!("{}", session.user_id),
        None => output::info("not signed in"),
    }
    Ok(())
}

fn print_job_count(app: &App) {
    let count = app.context.jobs().jobs().len();
    output::info(&format!("{} job(s) on the dashboard", count));
}
