//! Accounting Callback Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::QueryParam, prelude::*};

use crate::{extensions::*, integrations::errors::into_status_error, state::State};

/// Accounting Callback Handler
///
/// The provider's redirect target. Verifies the handshake state,
/// exchanges the code for tokens, and sends the caller back to the
/// integrations page.
#[endpoint(
    tags("integrations"),
    summary = "Accounting OAuth Callback",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::SEE_OTHER, description = "Connection stored"),
        (status_code = StatusCode::BAD_REQUEST, description = "State mismatch"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Provider rejected the exchange"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: QueryParam<String, true>,
    state: QueryParam<String, true>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<(), StatusError> {
    let app_state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.auth_user_or_401()?;

    app_state
        .app
        .accounting
        .complete_connect(user.uuid, &code.into_inner(), &state.into_inner())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, "/integrations", true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::SEE_OTHER);

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::{affix_state::inject, test::TestClient};
    use testresult::TestResult;

    use bibliotek_app::integrations::accounting::{
        AccountingServiceError, MockAccountingService,
    };

    use crate::test_helpers::{TEST_USER_UUID, inject_member, state_with_accounting};

    use super::*;

    fn make_service(repo: MockAccountingService) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(state_with_accounting(repo)))
                .hoop(inject_member)
                .push(Router::with_path("integrations/accounting/callback").get(handler)),
        )
    }

    #[tokio::test]
    async fn test_callback_stores_tokens_and_redirects_back() -> TestResult {
        let mut repo = MockAccountingService::new();

        repo.expect_complete_connect()
            .once()
            .withf(|user, code, state| {
                *user == TEST_USER_UUID && code == "the-code" && state == "abc123"
            })
            .return_once(|_, _, _| Ok(()));

        let res = TestClient::get(
            "http://example.com/integrations/accounting/callback?code=the-code&state=abc123",
        )
        .send(&make_service(repo))
        .await;

        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::SEE_OTHER));
        assert_eq!(location, Some("/integrations"));

        Ok(())
    }

    #[tokio::test]
    async fn test_callback_with_mismatched_state_returns_400() -> TestResult {
        let mut repo = MockAccountingService::new();

        repo.expect_complete_connect()
            .once()
            .return_once(|_, _, _| Err(AccountingServiceError::StateMismatch));

        let res = TestClient::get(
            "http://example.com/integrations/accounting/callback?code=the-code&state=wrong",
        )
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_callback_without_code_returns_400() -> TestResult {
        let mut repo = MockAccountingService::new();

        repo.expect_complete_connect().never();

        let res = TestClient::get(
            "http://example.com/integrations/accounting/callback?state=abc123",
        )
        .send(&make_service(repo))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
