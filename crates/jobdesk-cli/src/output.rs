//! Terminal rendering.

use colored::Colorize;
use jobdesk_core::job::{Job, JobStatus};
use jobdesk_core::notification::{Notification, NotificationKind};

pub fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        match notification.kind {
            NotificationKind::Success => println!("{} {}", "✓".green(), notification.message),
            NotificationKind::Error => eprintln!("{} {}", "✗".red(), notification.message),
        }
    }
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn info(message: &str) {
    println!("{}", message.dimmed());
}

fn status_label(status: JobStatus) -> String {
    let label = format!("{:<10}", status.as_str());
    match status {
        JobStatus::Done => label.green().to_string(),
        JobStatus::Failed => label.red().to_string(),
        JobStatus::Progressed => label.yellow().to_string(),
        JobStatus::Queued | JobStatus::Unknown => label.normal().to_string(),
    }
}

fn created_label(job: &Job) -> String {
    job.created_date()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| job.created_at.clone())
}

/// One line of the job table, without colour codes in the fixed columns.
pub fn job_row(job: &Job) -> String {
    let report = if job.report_available() { "yes" } else { "-" };
    format!(
        "{:<12} {:<12} {} {}",
        job.job_id,
        created_label(job),
        status_label(job.status),
        report
    )
}

pub fn print_jobs(jobs: &[Job]) {
    if jobs.is_empty() {
        info("No jobs yet. Create one with `jobdesk jobs create <FILES>...`.");
        return;
    }

    println!(
        "{}",
        format!("{:<12} {:<12} {:<10} {}", "ID", "CREATED", "STATUS", "REPORT").bold()
    );
    for job in jobs {
        println!("{}", job_row(job));
    }

    let pending = jobs.iter().filter(|job| !job.status.is_terminal()).count();
    if pending > 0 {
        info(&format!("{} job(s) still in progress", pending));
    }
}
