/// The authentication gate: holds the bearer token; everything else is
/// derived from its presence. There is no refresh or expiry check; an
/// expired token surfaces as a failed API call.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn apply_login(&mut self, token: String) {
        self.loading = false;
        self.token = Some(token);
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    pub(crate) fn apply_logout(&mut self) {
        self.token = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_is_derived_from_the_token() {
        let mut session = Session::default();
        assert!(!session.is_authenticated());

        session.apply_login("tok".to_string());
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some("tok"));

        session.apply_logout();
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn failed_login_keeps_the_gate_shut() {
        let mut session = Session::default();
        session.begin();
        assert!(session.is_loading());

        session.fail("server returned 401 Unauthorized: bad credentials".to_string());
        assert!(!session.is_loading());
        assert!(!session.is_authenticated());
        assert!(session.error().unwrap().contains("401"));

        session.clear_error();
        assert_eq!(session.error(), None);
    }

    #[test]
    fn begin_clears_a_stale_error() {
        let mut session = Session::default();
        session.fail("no route to host".to_string());
        session.begin();
        assert_eq!(session.error(), None);
    }
}
