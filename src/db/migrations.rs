//! Named schema steps, applied at most once and recorded in `_migrations`.
//!
//! Each step runs inside a single transaction together with its seed rows
//! and its tracking record, so a failure leaves neither behind.

use chrono::{DateTime, Duration, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

/// One ordered schema step.
#[derive(Debug)]
pub struct Migration {
    pub name: &'static str,
    pub description: &'static str,
    up: &'static str,
    down: &'static str,
    seed: Seed,
}

#[derive(Debug, Clone, Copy)]
enum Seed {
    Items,
    DemoEmails,
}

/// Every known step, oldest first.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "001_create_items_table",
        description: "items table with sample rows",
        up: r#"CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        )"#,
        down: "DROP TABLE IF EXISTS items",
        seed: Seed::Items,
    },
    Migration {
        name: "002_create_emails_table",
        description: "emails table with demo messages",
        up: r#"CREATE TABLE IF NOT EXISTS emails (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sender_name TEXT NOT NULL,
            sender_email TEXT NOT NULL,
            recipient_name TEXT NOT NULL,
            recipient_email TEXT NOT NULL,
            subject TEXT NOT NULL,
            body TEXT NOT NULL,
            preview TEXT,
            is_read INTEGER NOT NULL DEFAULT 0,
            is_archived INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            attachment_name TEXT,
            attachment_size TEXT
        )"#,
        down: "DROP TABLE IF EXISTS emails",
        seed: Seed::DemoEmails,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    AlreadyApplied,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Applied => f.write_str("applied"),
            Outcome::AlreadyApplied => f.write_str("already applied"),
        }
    }
}

/// State of one known step, as reported by [`status`].
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    pub name: &'static str,
    pub description: &'static str,
    pub applied_at: Option<DateTime<Utc>>,
}

async fn ensure_tracking_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT DEFAULT CURRENT_TIMESTAMP
        )"#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

async fn is_recorded(conn: &mut SqliteConnection, name: &str) -> Result<bool, sqlx::Error> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM _migrations WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(found.is_some())
}

/// Apply one step unless it is already recorded.
pub async fn apply(pool: &SqlitePool, migration: &Migration) -> Result<Outcome, sqlx::Error> {
    ensure_tracking_table(pool).await?;
    let mut tx = pool.begin().await?;
    if is_recorded(&mut tx, migration.name).await? {
        return Ok(Outcome::AlreadyApplied);
    }

    sqlx::query(migration.up).execute(&mut *tx).await?;
    seed(&mut tx, migration.seed).await?;
    sqlx::query("INSERT INTO _migrations (name, applied_at) VALUES (?, ?)")
        .bind(migration.name)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    info!(
        migration = migration.name,
        description = migration.description,
        "migration applied"
    );
    Ok(Outcome::Applied)
}

/// Apply every pending step in order.
pub async fn run_migrations(pool: &SqlitePool) -> Result<Vec<(&'static str, Outcome)>, sqlx::Error> {
    let mut report = Vec::with_capacity(MIGRATIONS.len());
    for migration in MIGRATIONS {
        report.push((migration.name, apply(pool, migration).await?));
    }
    Ok(report)
}

/// Undo one step. Returns `false` when it was not applied.
pub async fn revert(pool: &SqlitePool, migration: &Migration) -> Result<bool, sqlx::Error> {
    ensure_tracking_table(pool).await?;
    let mut tx = pool.begin().await?;
    if !is_recorded(&mut tx, migration.name).await? {
        return Ok(false);
    }
    sqlx::query(migration.down).execute(&mut *tx).await?;
    sqlx::query("DELETE FROM _migrations WHERE name = ?")
        .bind(migration.name)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    info!(migration = migration.name, "migration reverted");
    Ok(true)
}

/// Undo the most recently applied known step, if any.
pub async fn revert_latest(pool: &SqlitePool) -> Result<Option<&'static str>, sqlx::Error> {
    for migration in MIGRATIONS.iter().rev() {
        if revert(pool, migration).await? {
            return Ok(Some(migration.name));
        }
    }
    Ok(None)
}

pub async fn status(pool: &SqlitePool) -> Result<Vec<MigrationStatus>, sqlx::Error> {
    ensure_tracking_table(pool).await?;
    let rows: Vec<(String, Option<DateTime<Utc>>)> =
        sqlx::query_as("SELECT name, applied_at FROM _migrations")
            .fetch_all(pool)
            .await?;
    Ok(MIGRATIONS
        .iter()
        .map(|m| MigrationStatus {
            name: m.name,
            description: m.description,
            applied_at: rows
                .iter()
                .find(|(name, _)| name == m.name)
                .and_then(|(_, at)| *at),
        })
        .collect())
}

async fn seed(conn: &mut SqliteConnection, seed: Seed) -> Result<(), sqlx::Error> {
    match seed {
        Seed::Items => {
            for name in ["Apple", "Banana", "Cherry"] {
                sqlx::query("INSERT INTO items (name) VALUES (?)")
                    .bind(name)
                    .execute(&mut *conn)
                    .await?;
            }
        }
        Seed::DemoEmails => {
            let now = Utc::now();
            for (days_ago, email) in DEMO_EMAILS.iter().enumerate() {
                sqlx::query(
                    "INSERT INTO emails (sender_name, sender_email, recipient_name, recipient_email, subject, body, preview, is_read, is_archived, attachment_name, attachment_size, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?)",
                )
                .bind(email.sender_name)
                .bind(email.sender_email)
                .bind("Richard Brown")
                .bind("richard.brown@company.com")
                .bind(email.subject)
                .bind(email.body)
                .bind(email.preview)
                .bind(email.is_read)
                .bind(email.attachment.map(|(name, _)| name))
                .bind(email.attachment.map(|(_, size)| size))
                .bind(now - Duration::days(days_ago as i64))
                .execute(&mut *conn)
                .await?;
            }
        }
    }
    Ok(())
}

struct DemoEmail {
    sender_name: &'static str,
    sender_email: &'static str,
    subject: &'static str,
    body: &'static str,
    preview: &'static str,
    is_read: bool,
    attachment: Option<(&'static str, &'static str)>,
}

const DEMO_EMAILS: &[DemoEmail] = &[
    DemoEmail {
        sender_name: "Jane Doe",
        sender_email: "jane.doe@business.com",
        subject: "Proposal for Partnership ✨",
        body: "Hi John, hope this message finds you well!\n\n\
I'm reaching out to explore a potential partnership between our companies. I believe there's a strong alignment in our goals and we could create significant value together.\n\n\
I've attached a detailed proposal for your review. Would you be available for a brief call next week to discuss?\n\n\
Looking forward to hearing from you.\n\n\
Best regards,\nJane Doe",
        preview: "I'm reaching out to explore a potential partnership between our companies...",
        is_read: false,
        attachment: Some(("Proposal Partnership.pdf", "1.5 MB")),
    },
    DemoEmail {
        sender_name: "Michael Lee",
        sender_email: "michael.lee@vendor.com",
        subject: "Follow-Up: Product Demo Feedba...",
        body: "Hi Richard, I wanted to follow up on our product demo last week...",
        preview: "I wanted to follow up on our product demo last week...",
        is_read: true,
        attachment: None,
    },
    DemoEmail {
        sender_name: "Support Team",
        sender_email: "support@service.com",
        subject: "Contract Renewal Due 🗓️",
        body: "Your annual contract is up for renewal. Please review the attached terms...",
        preview: "Your annual contract is up for renewal...",
        is_read: true,
        attachment: None,
    },
    DemoEmail {
        sender_name: "Downe Johnson",
        sender_email: "downe.j@client.org",
        subject: "Q4 Budget Approval Request 📊",
        body: "Hi Richard, I need your sign-off on the Q4 budget proposal...",
        preview: "I need your sign-off on the Q4 budget proposal...",
        is_read: false,
        attachment: None,
    },
];
