//! Auth/permission context: bridges the session provider's notifications
//! into the permission model and exposes one consistent read surface.
//!
//! The context is the **only** subscriber to the provider; everything else
//! reads through a cloned handle. Profile fetches are fire-and-forget with
//! guarded completion: each in-flight fetch is tagged with the session uid
//! it was issued for, and a resolution whose tag no longer matches the
//! current session is discarded. The exposed permission set therefore always
//! reflects the most recent session change, never the last fetch to resolve.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use fruition_auth::{has_feature, permissions_for_role, Permission, Role};
use fruition_core::UserId;

use crate::profile::{Profile, ProfileStore};
use crate::provider::SessionProvider;
use crate::session::{Session, SessionChange};

/// Shared handle to the auth/permission context.
///
/// Cheap to clone; all clones observe the same state.
#[derive(Clone)]
pub struct AuthContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    store: Arc<dyn ProfileStore>,
    state: Mutex<AuthState>,
    ready_tx: watch::Sender<bool>,
    // Held so the channel outlives transient subscribers.
    _ready_rx: watch::Receiver<bool>,
    context_id: Uuid,
}

#[derive(Debug)]
struct AuthState {
    loading: bool,
    session: Option<Session>,
    profile: Option<Profile>,
    permissions: HashSet<Permission>,
}

/// Point-in-time view of the context, coherent across all fields.
///
/// Guards evaluate against a snapshot so a decision never mixes state from
/// two different session changes.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub loading: bool,
    pub session: Option<Session>,
    pub role: Option<Role>,
    pub permissions: HashSet<Permission>,
}

impl AuthSnapshot {
    pub fn has_permission(&self, id: &str) -> bool {
        self.permissions.contains(&Permission::new(id.to_string()))
    }

    pub fn has_any_permission(&self, ids: &[&str]) -> bool {
        ids.iter().any(|id| self.has_permission(id))
    }

    pub fn has_feature(&self, id: &str) -> bool {
        has_feature(id, &self.permissions)
    }
}

impl AuthContext {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        let (ready_tx, ready_rx) = watch::channel(false);
        Self {
            inner: Arc::new(ContextInner {
                store,
                state: Mutex::new(AuthState {
                    loading: true,
                    session: None,
                    profile: None,
                    permissions: HashSet::new(),
                }),
                ready_tx,
                _ready_rx: ready_rx,
                context_id: Uuid::now_v7(),
            }),
        }
    }

    /// Subscribe to the provider and drive the context from its
    /// notifications. Must be called from within a tokio runtime.
    ///
    /// Notifications are applied to the session state strictly in arrival
    /// order; only the profile fetches they trigger run concurrently.
    pub fn attach(&self, provider: &dyn SessionProvider) -> JoinHandle<()> {
        let mut events = provider.subscribe();
        let ctx = self.clone();
        tokio::spawn(async move {
            while let Some(change) = events.next().await {
                if let Some(uid) = ctx.begin_change(change) {
                    let ctx = ctx.clone();
                    tokio::spawn(async move { ctx.resolve_profile(uid).await });
                }
            }
            tracing::debug!(context = %ctx.inner.context_id, "session provider closed");
        })
    }

    /// Apply a session change. Returns the uid to fetch a profile for, if
    /// the change established a session.
    ///
    /// Pending permissions are cleared immediately: between a session change
    /// and its fetch resolution the user holds no grants (fail-closed).
    fn begin_change(&self, change: SessionChange) -> Option<UserId> {
        let mut state = self.lock_state();
        state.profile = None;
        state.permissions.clear();

        match change {
            Some(session) => {
                tracing::debug!(
                    context = %self.inner.context_id,
                    uid = %session.uid,
                    "session established, fetching profile"
                );
                let uid = session.uid.clone();
                state.session = Some(session);
                Some(uid)
            }
            None => {
                tracing::debug!(context = %self.inner.context_id, "session cleared");
                state.session = None;
                self.finish_loading(&mut state);
                None
            }
        }
    }

    /// Fetch the profile for `uid` and apply the result, unless the session
    /// has moved on in the meantime.
    async fn resolve_profile(&self, uid: UserId) {
        let result = self.inner.store.fetch(&uid).await;

        let mut state = self.lock_state();
        let current_uid = state.session.as_ref().map(|s| s.uid.clone());
        if current_uid.as_ref() != Some(&uid) {
            tracing::debug!(
                context = %self.inner.context_id,
                fetched = %uid,
                "discarding stale profile fetch"
            );
            return;
        }

        match result {
            Ok(profile) => {
                state.permissions = permissions_for_role(&profile.role);
                tracing::info!(
                    context = %self.inner.context_id,
                    uid = %uid,
                    role = %profile.role,
                    "profile resolved"
                );
                state.profile = Some(profile);
            }
            Err(err) => {
                // Fail closed: still signed in at the provider level, but no
                // profile and no grants.
                tracing::warn!(
                    context = %self.inner.context_id,
                    uid = %uid,
                    error = %err,
                    "profile fetch failed, treating as no profile"
                );
                state.profile = None;
                state.permissions.clear();
            }
        }

        self.finish_loading(&mut state);
    }

    fn finish_loading(&self, state: &mut AuthState) {
        if state.loading {
            state.loading = false;
        }
        self.inner.ready_tx.send_replace(true);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, AuthState> {
        // State updates never panic while holding the lock; recover the
        // guard rather than wedging every reader if one ever does.
        match self.inner.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// True until the first session notification has been fully processed,
    /// including its profile fetch.
    pub fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    /// Completes once the first session notification has been processed.
    ///
    /// The explicit readiness signal consumers await instead of polling
    /// ambient state.
    pub async fn wait_ready(&self) {
        let mut rx = self.inner.ready_tx.subscribe();
        // Closed is impossible while the context holds its own receiver.
        let _ = rx.wait_for(|ready| *ready).await;
    }

    pub fn session(&self) -> Option<Session> {
        self.lock_state().session.clone()
    }

    pub fn profile(&self) -> Option<Profile> {
        self.lock_state().profile.clone()
    }

    pub fn role(&self) -> Option<Role> {
        self.lock_state().profile.as_ref().map(|p| p.role.clone())
    }

    pub fn permissions(&self) -> HashSet<Permission> {
        self.lock_state().permissions.clone()
    }

    /// Membership test on the current permission set.
    pub fn has_permission(&self, id: &str) -> bool {
        self.lock_state()
            .permissions
            .contains(&Permission::new(id.to_string()))
    }

    /// Feature-gate test against the current permission set. Unknown
    /// features resolve to false.
    pub fn has_feature(&self, id: &str) -> bool {
        has_feature(id, &self.lock_state().permissions)
    }

    /// Coherent point-in-time view for guard evaluation.
    pub fn snapshot(&self) -> AuthSnapshot {
        let state = self.lock_state();
        AuthSnapshot {
            loading: state.loading,
            session: state.session.clone(),
            role: state.profile.as_ref().map(|p| p.role.clone()),
            permissions: state.permissions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use fruition_auth::perm;

    use crate::profile::{InMemoryProfileStore, ProfileError};

    fn student_profile(uid: &str) -> Profile {
        Profile::new(uid.to_string(), Role::new("student"), format!("{uid}@uni.edu"))
    }

    fn faculty_profile(uid: &str) -> Profile {
        Profile::new(uid.to_string(), Role::new("faculty"), format!("{uid}@uni.edu"))
    }

    fn session(uid: &str) -> Session {
        Session::new(uid.to_string(), format!("{uid}@uni.edu"))
    }

    /// Apply one change to completion, the way the driver would if nothing
    /// overlapped.
    async fn process(ctx: &AuthContext, change: SessionChange) {
        if let Some(uid) = ctx.begin_change(change) {
            ctx.resolve_profile(uid).await;
        }
    }

    /// Profile store whose fetches block until the test releases them.
    struct GatedStore {
        profiles: HashMap<String, Profile>,
        gates: HashMap<String, Arc<Notify>>,
    }

    #[async_trait]
    impl ProfileStore for GatedStore {
        async fn fetch(&self, uid: &UserId) -> Result<Profile, ProfileError> {
            if let Some(gate) = self.gates.get(uid.as_str()) {
                gate.notified().await;
            }
            self.profiles
                .get(uid.as_str())
                .cloned()
                .ok_or(ProfileError::NotFound)
        }
    }

    #[tokio::test]
    async fn starts_loading_with_no_permissions() {
        let ctx = AuthContext::new(Arc::new(InMemoryProfileStore::new()));
        assert!(ctx.is_loading());
        assert!(ctx.permissions().is_empty());
        assert!(ctx.session().is_none());
    }

    #[tokio::test]
    async fn no_session_notification_completes_loading() {
        let ctx = AuthContext::new(Arc::new(InMemoryProfileStore::new()));
        process(&ctx, None).await;

        assert!(!ctx.is_loading());
        assert!(ctx.session().is_none());
        assert!(ctx.permissions().is_empty());
        ctx.wait_ready().await;
    }

    #[tokio::test]
    async fn sign_in_derives_permissions_from_role() {
        let store = InMemoryProfileStore::new();
        store.insert(student_profile("alice"));
        let ctx = AuthContext::new(Arc::new(store));

        process(&ctx, Some(session("alice"))).await;

        assert!(!ctx.is_loading());
        assert!(ctx.has_permission(perm::SWIPE_PROJECTS));
        assert!(!ctx.has_permission(perm::CREATE_PROJECT));
        assert!(ctx.has_feature("connect"));
        assert!(ctx.has_feature("dashboard"));
        assert!(!ctx.has_feature("admin_console"));
        assert_eq!(ctx.role(), Some(Role::new("student")));
    }

    #[tokio::test]
    async fn missing_profile_fails_closed_but_stays_signed_in() {
        let ctx = AuthContext::new(Arc::new(InMemoryProfileStore::new()));
        process(&ctx, Some(session("ghost"))).await;

        assert!(!ctx.is_loading());
        assert!(ctx.session().is_some());
        assert!(ctx.profile().is_none());
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn store_failure_fails_closed_but_stays_signed_in() {
        struct BrokenStore;

        #[async_trait]
        impl ProfileStore for BrokenStore {
            async fn fetch(&self, _uid: &UserId) -> Result<Profile, ProfileError> {
                Err(ProfileError::Unavailable("network down".to_string()))
            }
        }

        let ctx = AuthContext::new(Arc::new(BrokenStore));
        process(&ctx, Some(session("alice"))).await;

        assert!(!ctx.is_loading());
        assert!(ctx.session().is_some());
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn sign_out_clears_profile_and_permissions() {
        let store = InMemoryProfileStore::new();
        store.insert(student_profile("alice"));
        let ctx = AuthContext::new(Arc::new(store));

        process(&ctx, Some(session("alice"))).await;
        assert!(ctx.has_permission(perm::SWIPE_PROJECTS));

        process(&ctx, None).await;
        assert!(ctx.session().is_none());
        assert!(ctx.profile().is_none());
        assert!(ctx.permissions().is_empty());
    }

    #[tokio::test]
    async fn repeated_unchanged_notifications_are_harmless() {
        let store = InMemoryProfileStore::new();
        store.insert(faculty_profile("bob"));
        let ctx = AuthContext::new(Arc::new(store));

        process(&ctx, Some(session("bob"))).await;
        let first = ctx.permissions();
        process(&ctx, Some(session("bob"))).await;

        assert_eq!(ctx.permissions(), first);
        assert_eq!(ctx.role(), Some(Role::new("faculty")));
    }

    // The ordering guarantee: a stale fetch resolving after a newer session
    // change must not overwrite the newer change's result.
    #[tokio::test]
    async fn last_session_change_wins_over_last_fetch_to_resolve() {
        let alice_gate = Arc::new(Notify::new());
        let bob_gate = Arc::new(Notify::new());

        let store = GatedStore {
            profiles: HashMap::from([
                ("alice".to_string(), student_profile("alice")),
                ("bob".to_string(), faculty_profile("bob")),
            ]),
            gates: HashMap::from([
                ("alice".to_string(), alice_gate.clone()),
                ("bob".to_string(), bob_gate.clone()),
            ]),
        };
        let ctx = AuthContext::new(Arc::new(store));

        // Change A (alice/student) starts its fetch first.
        let uid_a = ctx.begin_change(Some(session("alice"))).unwrap();
        let task_a = tokio::spawn({
            let ctx = ctx.clone();
            async move { ctx.resolve_profile(uid_a).await }
        });

        // Change B (bob/faculty) supersedes it.
        let uid_b = ctx.begin_change(Some(session("bob"))).unwrap();
        let task_b = tokio::spawn({
            let ctx = ctx.clone();
            async move { ctx.resolve_profile(uid_b).await }
        });

        // B's fetch completes first.
        bob_gate.notify_one();
        task_b.await.unwrap();
        assert!(ctx.has_permission(perm::CREATE_PROJECT));

        // A's fetch resolves late with stale data and must be discarded.
        alice_gate.notify_one();
        task_a.await.unwrap();

        assert_eq!(ctx.role(), Some(Role::new("faculty")));
        assert!(ctx.has_permission(perm::CREATE_PROJECT));
        assert!(!ctx.has_permission(perm::SWIPE_PROJECTS));
        assert_eq!(ctx.session().unwrap().uid.as_str(), "bob");
    }

    #[tokio::test]
    async fn snapshot_is_coherent() {
        let store = InMemoryProfileStore::new();
        store.insert(faculty_profile("bob"));
        let ctx = AuthContext::new(Arc::new(store));
        process(&ctx, Some(session("bob"))).await;

        let snapshot = ctx.snapshot();
        assert!(!snapshot.loading);
        assert_eq!(snapshot.role, Some(Role::new("faculty")));
        assert!(snapshot.has_permission(perm::VIEW_APPLICATIONS));
        assert!(snapshot.has_any_permission(&[perm::MANAGE_USERS, perm::VIEW_APPLICATIONS]));
        assert!(snapshot.has_feature("application_review"));
        assert!(!snapshot.has_feature("messaging"));
    }
}
