use crate::{
    cli::{
        actions::{views, Desk},
        globals::GlobalArgs,
    },
    features::events::client,
    navigation::Route,
};
use anyhow::Result;

#[derive(Debug)]
pub enum Op {
    ShowEvent { id: String },
    ListExhibitions,
    ShowExhibition { id: String },
}

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub op: Op,
}

/// Execute a browsing action. These views are public.
///
/// # Errors
/// Returns an error when the client cannot be configured.
pub async fn execute(args: Args) -> Result<()> {
    let desk = Desk::open(&args.globals).await?;
    let api = desk.api();

    match args.op {
        Op::ShowEvent { id } => {
            if desk.enter(&Route::Event(id.clone())) {
                match client::get_event(api, &id).await {
                    Ok(event) => views::event(&event),
                    Err(err) => views::failure(&err.user_message()),
                }
            }
        }
        Op::ListExhibitions => {
            if desk.enter(&Route::Exhibitions) {
                match client::list_exhibitions(api).await {
                    Ok(items) => views::exhibitions(&items),
                    Err(err) => views::failure(&err.user_message()),
                }
            }
        }
        Op::ShowExhibition { id } => {
            if desk.enter(&Route::Exhibition(id.clone())) {
                match client::get_exhibition(api, &id).await {
                    Ok(item) => views::exhibition(&item),
                    Err(err) => views::failure(&err.user_message()),
                }
            }
        }
    }

    Ok(())
}
