use super::App;
use crate::output;
use anyhow::{Context, Result};
use jobdesk_application::SubmitOutcome;
use jobdesk_application::job_list::LOAD_FAILED;
use jobdesk_core::navigation::Screen;
use jobdesk_infrastructure::file_source;
use std::path::{Path, PathBuf};

pub async fn list(app: &mut App) -> Result<()> {
    app.start_signed_in().await?;

    // Landing on the dashboard already loaded the list.
    if app.flush_notifications() {
        anyhow::bail!(LOAD_FAILED);
    }
    output::print_jobs(app.context.jobs().jobs());
    Ok(())
}

pub async fn delete(app: &mut App, id: &str) -> Result<()> {
    app.start_signed_in().await?;

    let deleted = app.context.delete_job(id).await?;
    app.flush_notifications();
    if !deleted {
        anyhow::bail!("Job {} was not deleted", id);
    }
    Ok(())
}

pub async fn report(app: &mut App, id: &str, output_dir: Option<&Path>) -> Result<()> {
    app.start_signed_in().await?;

    let Some(dir) = output_dir else {
        let url = app.context.report_url(id).await;
        app.flush_notifications();
        let url = url.with_context(|| format!("No report for job {}", id))?;
        println!("{}", url);
        return Ok(());
    };

    let report = app.context.fetch_report(id).await;
    app.flush_notifications();
    let report = report.with_context(|| format!("No report for job {}", id))?;

    let destination = report_path(dir, id);
    let bytes = file_source::save_bytes(&destination, &report.content)
        .await
        .with_context(|| format!("Failed to save report for job {}", id))?;
    output::success(&format!(
        "Saved report ({} bytes) to {}",
        bytes,
        destination.display()
    ));
    Ok(())
}

pub async fn create(app: &mut App, files: &[PathBuf]) -> Result<()> {
    app.start_signed_in().await?;
    app.context.navigate(Screen::NewJob).await;

    let selected = file_source::inspect_files(files)
        .await
        .context("Failed to read the selected files")?;
    app.context.add_files(selected);
    app.flush_notifications();

    let count = app.context.new_job().files().len();
    if count > 0 {
        output::info(&format!("Uploading {} image(s)...", count));
    }

    let outcome = app.context.submit_job().await?;
    app.flush_notifications();

    match outcome {
        SubmitOutcome::Created { .. } => {
            output::print_jobs(app.context.jobs().jobs());
            Ok(())
        }
        SubmitOutcome::EmptySelection => anyhow::bail!("No valid images to upload"),
        SubmitOutcome::Failed => anyhow::bail!("The job was not created"),
    }
}

fn report_path(dir: &Path, id: &str) -> PathBuf {
    dir.join(format!("report-{}.pdf", id))
}
