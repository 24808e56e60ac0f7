//! Identity middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::error;
use uuid::Uuid;

use cartwheel_app::domain::users::{UsersServiceError, records::UserUuid};

use crate::{extensions::*, identity::USER_UUID_HEADER, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(user) = extract_user_uuid(req) else {
        res.render(StatusError::unauthorized().brief("Missing or invalid X-User-Uuid header"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    match state.app.users.get_user(user).await {
        Ok(_user) => {}
        Err(UsersServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Unknown user"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to resolve caller identity: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    }

    depot.insert_user_uuid(user);

    ctrl.call_next(req, depot, res).await;
}

fn extract_user_uuid(req: &Request) -> Option<UserUuid> {
    let value = req.headers().get(USER_UUID_HEADER)?.to_str().ok()?;

    Uuid::parse_str(value.trim()).ok().map(UserUuid::from_uuid)
}
