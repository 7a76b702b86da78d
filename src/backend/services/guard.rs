//! Route guard decision.

use crate::backend::api::Role;
use crate::backend::services::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// What a guarded route should do on this render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The startup session is not known yet; render a placeholder.
    Pending,
    /// No trusted session. Replace history so back does not loop.
    RedirectToLogin,
    /// Signed in, but the role is not on the route's allow-list.
    RedirectToUnauthorized,
    Authorized,
}

impl GuardOutcome {
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToUnauthorized => Some(UNAUTHORIZED_PATH),
            Self::Pending | Self::Authorized => None,
        }
    }
}

/// Decides a navigation. `allowed_roles` of `None` admits any signed-in
/// admin. A missing token always redirects to login, even mid-restore, and
/// the login redirect wins over the role check.
pub fn evaluate(session: &Session, allowed_roles: Option<&[Role]>) -> GuardOutcome {
    if session.token.is_none() {
        return GuardOutcome::RedirectToLogin;
    }
    if session.is_restoring() {
        return GuardOutcome::Pending;
    }

    let Some(user) = &session.user else {
        return GuardOutcome::RedirectToLogin;
    };

    match allowed_roles {
        Some(roles) if !roles.contains(&user.role) => GuardOutcome::RedirectToUnauthorized,
        _ => GuardOutcome::Authorized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::api::User;
    use crate::backend::services::session::SessionPhase;
    use rstest::rstest;
    use serde_json::json;

    const SUPER_ONLY: &[Role] = &[Role::SuperAdmin];

    fn session(token: Option<&str>, role: Option<&str>) -> Session {
        Session {
            user: role.map(|role| {
                serde_json::from_value::<User>(json!({ "_id": "u1", "role": role }))
                    .expect("valid user")
            }),
            token: token.map(str::to_string),
            user_id: role.map(|_| "u1".to_string()),
            phase: SessionPhase::Ready,
        }
    }

    #[rstest]
    #[case::no_token_no_rule(None, None, None, GuardOutcome::RedirectToLogin)]
    #[case::no_token_with_rule(None, None, Some(SUPER_ONLY), GuardOutcome::RedirectToLogin)]
    #[case::user_without_token(None, Some("superadmin"), Some(SUPER_ONLY), GuardOutcome::RedirectToLogin)]
    #[case::token_without_user(Some("x"), None, None, GuardOutcome::RedirectToLogin)]
    #[case::wrong_role(Some("x"), Some("admin"), Some(SUPER_ONLY), GuardOutcome::RedirectToUnauthorized)]
    #[case::right_role(Some("x"), Some("superadmin"), Some(SUPER_ONLY), GuardOutcome::Authorized)]
    #[case::any_role(Some("x"), Some("admin"), None, GuardOutcome::Authorized)]
    #[case::unknown_role(Some("x"), Some("moderator"), Some(SUPER_ONLY), GuardOutcome::RedirectToUnauthorized)]
    fn redirect_matrix(
        #[case] token: Option<&str>,
        #[case] role: Option<&str>,
        #[case] rule: Option<&[Role]>,
        #[case] expected: GuardOutcome,
    ) {
        assert_eq!(evaluate(&session(token, role), rule), expected);
    }

    #[test]
    fn restoring_session_with_token_waits() {
        let mut restoring = session(Some("x"), None);
        restoring.phase = SessionPhase::Restoring;
        assert_eq!(evaluate(&restoring, Some(SUPER_ONLY)), GuardOutcome::Pending);
        assert_eq!(GuardOutcome::Pending.redirect_path(), None);
    }

    #[test]
    fn missing_token_redirects_even_while_restoring() {
        let mut restoring = session(None, None);
        restoring.phase = SessionPhase::Restoring;
        assert_eq!(evaluate(&restoring, None), GuardOutcome::RedirectToLogin);
        assert_eq!(evaluate(&Session::default(), Some(SUPER_ONLY)), GuardOutcome::RedirectToLogin);
    }

    #[test]
    fn redirect_paths() {
        assert_eq!(GuardOutcome::RedirectToLogin.redirect_path(), Some("/login"));
        assert_eq!(GuardOutcome::RedirectToUnauthorized.redirect_path(), Some("/unauthorized"));
    }
}
