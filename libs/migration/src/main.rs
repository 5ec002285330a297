use migration::Migrator;
use sea_orm_migration::cli;

/// SeaORM migration CLI (`up`, `down`, `status`, `fresh`, ...) driven by `DATABASE_URL`
#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
