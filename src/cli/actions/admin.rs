use crate::{
    cli::{
        actions::{views, Desk},
        globals::GlobalArgs,
    },
    features::admin::{client, NewUser, UserUpdate},
    navigation::Route,
};
use anyhow::Result;

#[derive(Debug)]
pub enum Op {
    Stats,
    ListUsers,
    ShowUser { id: String },
    CreateUser(NewUser),
    UpdateUser { id: String, update: UserUpdate },
    DeleteUser { id: String },
}

impl Op {
    fn route(&self) -> Route {
        match self {
            Self::Stats => Route::Admin,
            Self::ListUsers | Self::CreateUser(_) => Route::AdminUsers,
            Self::ShowUser { id } | Self::UpdateUser { id, .. } | Self::DeleteUser { id } => {
                Route::AdminUser(id.clone())
            }
        }
    }
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub op: Op,
}

/// Execute an administration action. Admin sessions only.
///
/// # Errors
/// Returns an error when the client cannot be configured.
pub async fn execute(args: Args) -> Result<()> {
    let desk = Desk::open(&args.globals).await?;
    if !desk.enter(&args.op.route()) {
        return Ok(());
    }

    let api = desk.api();
    match args.op {
        Op::Stats => match client::stats(api).await {
            Ok(stats) => views::stats(&stats),
            Err(err) => views::failure(&err.user_message()),
        },
        Op::ListUsers => match client::list_users(api).await {
            Ok(users) => views::users(&users),
            Err(err) => views::failure(&err.user_message()),
        },
        Op::ShowUser { id } => match client::get_user(api, &id).await {
            Ok(user) => views::user(&user),
            Err(err) => views::failure(&err.user_message()),
        },
        Op::CreateUser(new_user) => match client::create_user(api, &new_user).await {
            Ok(user) => views::user(&user),
            Err(err) => views::failure(&err.user_message()),
        },
        Op::UpdateUser { id, update } => match client::update_user(api, &id, &update).await {
            Ok(user) => views::user(&user),
            Err(err) => views::failure(&err.user_message()),
        },
        Op::DeleteUser { id } => match client::delete_user(api, &id).await {
            Ok(()) => views::notice(&format!("User {id} deleted.")),
            Err(err) => views::failure(&err.user_message()),
        },
    }

    Ok(())
}
