use cartwheel_app::{
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, data::NewUser, records::UserUuid},
};
use clap::Args;
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    /// User display name
    #[arg(long)]
    name: String,

    /// User email, unique across users
    #[arg(long)]
    email: String,

    /// User credential, stored as given
    #[arg(long, env = "USER_PASSWORD", hide_env_values = true)]
    password: String,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Optional user UUID; generated when omitted
    #[arg(long)]
    user_uuid: Option<Uuid>,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    if args.email.trim().is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgUsersService::new(Db::new(pool));
    let user_uuid = args.user_uuid.map_or_else(UserUuid::new, UserUuid::from_uuid);

    let user = service
        .create_user(NewUser {
            uuid: user_uuid,
            name: args.name,
            email: args.email,
            password: args.password,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", user.uuid);
    println!("user_email: {}", user.email);

    Ok(())
}
