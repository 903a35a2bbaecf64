use mailroom::{
  app::{self, BoxError, Settings},
  db::migrations,
  util,
};

const USAGE: &str = "Usage: mailroom [serve | migrate [up|down|status]] [--version]";

#[tokio::main]
async fn main() {
  let args: Vec<String> = std::env::args().skip(1).collect();
  let args: Vec<&str> = args.iter().map(String::as_str).collect();

  let result = match args.as_slice() {
    ["--version"] | ["-V"] => {
      println!("mailroom {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    ["--help"] | ["-h"] => {
      eprintln!("{USAGE}");
      return;
    }
    [] | ["serve"] => serve().await,
    ["migrate"] | ["migrate", "up"] => migrate_up().await,
    ["migrate", "down"] => migrate_down().await,
    ["migrate", "status"] => migrate_status().await,
    _ => {
      eprintln!("{USAGE}");
      std::process::exit(2);
    }
  };

  if let Err(e) = result {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}

async fn serve() -> Result<(), BoxError> {
  util::init_tracing();
  app::run(Settings::from_env()?).await
}

async fn migrate_up() -> Result<(), BoxError> {
  let pool = Settings::from_env()?.connect().await?;
  for (name, outcome) in migrations::run_migrations(&pool).await? {
    println!("{name}: {outcome}");
  }
  Ok(())
}

async fn migrate_down() -> Result<(), BoxError> {
  let pool = Settings::from_env()?.connect().await?;
  match migrations::revert_latest(&pool).await? {
    Some(name) => println!("{name}: reverted"),
    None => println!("nothing to revert"),
  }
  Ok(())
}

async fn migrate_status() -> Result<(), BoxError> {
  let pool = Settings::from_env()?.connect().await?;
  for state in migrations::status(&pool).await? {
    match state.applied_at {
      Some(at) => println!(
        "{} ({}): applied at {}",
        state.name,
        state.description,
        at.to_rfc3339()
      ),
      None => println!("{} ({}): pending", state.name, state.description),
    }
  }
  Ok(())
}
