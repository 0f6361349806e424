//! In-process user-state repositories.
//!
//! Wired when no database is configured so a local run still behaves like
//! the Postgres-backed service within one process lifetime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    AlertPreferenceRepository, AlertPreferenceRepositoryError, CommentsRepository,
    CommentsRepositoryError, FavoritesRepository, FavoritesRepositoryError, Reconciliation,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AlertPreference, AlertPreferenceUpdate, Comment, Favorite, FavoriteAdded, IdentityClaim,
    LocalUser, MediaRef, NewComment, NewFavorite, ProfileUpdate, SubjectId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local user, favorite, alert and comment storage.
///
/// Honours the same contracts as the Postgres adapters: one row per
/// subject, idempotent favorite adds keyed by `(subject, media)`, a single
/// alert row per subject, owner rows required for dependent writes, and
/// newest-first listings with ties broken by descending id. Nothing survives
/// a restart.
pub struct InMemoryUserStore {
    users: Mutex<Vec<LocalUser>>,
    favorites: Mutex<Vec<Favorite>>,
    alerts: Mutex<Vec<(SubjectId, AlertPreference)>>,
    comments: Mutex<Vec<Comment>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryUserStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::default(),
            favorites: Mutex::default(),
            alerts: Mutex::default(),
            comments: Mutex::default(),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn has_user(&self, subject_id: &SubjectId) -> bool {
        lock(&self.users)
            .iter()
            .any(|user| &user.subject_id == subject_id)
    }

    /// Number of stored favorites across all users.
    pub fn favorite_count(&self) -> usize {
        lock(&self.favorites).len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn reconcile(&self, claim: &IdentityClaim) -> Result<Reconciliation, UserPersistenceError> {
        let mut users = lock(&self.users);
        if let Some(user) = users
            .iter_mut()
            .find(|user| user.subject_id == claim.subject_id)
        {
            return Ok(if user.apply_claim(claim) {
                Reconciliation::Updated(user.clone())
            } else {
                Reconciliation::Unchanged(user.clone())
            });
        }
        let user = LocalUser {
            subject_id: claim.subject_id.clone(),
            email: claim.email.clone(),
            display_name: claim.display_name.clone(),
            avatar_url: claim.avatar_url.clone(),
            created_at: self.now(),
        };
        users.push(user.clone());
        Ok(Reconciliation::Created(user))
    }

    async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<LocalUser>, UserPersistenceError> {
        Ok(lock(&self.users)
            .iter()
            .find(|user| &user.subject_id == subject_id)
            .cloned())
    }

    async fn update_profile(
        &self,
        subject_id: &SubjectId,
        update: &ProfileUpdate,
    ) -> Result<bool, UserPersistenceError> {
        let mut users = lock(&self.users);
        let Some(user) = users.iter_mut().find(|user| &user.subject_id == subject_id) else {
            return Ok(false);
        };
        if let Some(name) = update.display_name() {
            user.display_name = Some(name.to_owned());
        }
        if let Some(url) = update.avatar_url() {
            user.avatar_url = Some(url.to_owned());
        }
        Ok(true)
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryUserStore {
    async fn list(&self, subject_id: &SubjectId) -> Result<Vec<Favorite>, FavoritesRepositoryError> {
        let mut items: Vec<Favorite> = lock(&self.favorites)
            .iter()
            .filter(|favorite| &favorite.subject_id == subject_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn add(
        &self,
        subject_id: &SubjectId,
        favorite: &NewFavorite,
    ) -> Result<FavoriteAdded, FavoritesRepositoryError> {
        if !self.has_user(subject_id) {
            return Err(FavoritesRepositoryError::unknown_user(subject_id.as_ref()));
        }
        let mut favorites = lock(&self.favorites);
        if let Some(existing) = favorites
            .iter()
            .find(|stored| &stored.subject_id == subject_id && &stored.media == favorite.media())
        {
            return Ok(FavoriteAdded {
                favorite: existing.clone(),
                created: false,
            });
        }
        let stored = Favorite {
            id: favorites.iter().map(|stored| stored.id).max().unwrap_or(0) + 1,
            subject_id: subject_id.clone(),
            media: favorite.media().clone(),
            title: favorite.title().map(str::to_owned),
            poster_path: favorite.poster_path().map(str::to_owned),
            created_at: self.now(),
        };
        favorites.push(stored.clone());
        Ok(FavoriteAdded {
            favorite: stored,
            created: true,
        })
    }

    async fn remove(
        &self,
        subject_id: &SubjectId,
        media: &MediaRef,
    ) -> Result<bool, FavoritesRepositoryError> {
        let mut favorites = lock(&self.favorites);
        let before = favorites.len();
        favorites.retain(|stored| !(&stored.subject_id == subject_id && &stored.media == media));
        Ok(favorites.len() != before)
    }
}

#[async_trait]
impl AlertPreferenceRepository for InMemoryUserStore {
    async fn find(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<AlertPreference>, AlertPreferenceRepositoryError> {
        Ok(lock(&self.alerts)
            .iter()
            .find(|(owner, _)| owner == subject_id)
            .map(|(_, preference)| preference.clone()))
    }

    async fn upsert(
        &self,
        subject_id: &SubjectId,
        update: &AlertPreferenceUpdate,
    ) -> Result<AlertPreference, AlertPreferenceRepositoryError> {
        if !self.has_user(subject_id) {
            return Err(AlertPreferenceRepositoryError::unknown_user(
                subject_id.as_ref(),
            ));
        }
        let preference = AlertPreference {
            frequency: update.frequency(),
            keywords: update.keywords().to_owned(),
            channels: update.channels().to_owned(),
            updated_at: Some(self.now()),
        };
        let mut alerts = lock(&self.alerts);
        alerts.retain(|(owner, _)| owner != subject_id);
        alerts.push((subject_id.clone(), preference.clone()));
        Ok(preference)
    }
}

#[async_trait]
impl CommentsRepository for InMemoryUserStore {
    async fn list_for_media(&self, media: &MediaRef) -> Result<Vec<Comment>, CommentsRepositoryError> {
        let mut items: Vec<Comment> = lock(&self.comments)
            .iter()
            .filter(|comment| &comment.media == media)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentsRepositoryError> {
        if !self.has_user(&comment.subject_id) {
            return Err(CommentsRepositoryError::unknown_user(
                comment.subject_id.as_ref(),
            ));
        }
        let mut comments = lock(&self.comments);
        let stored = Comment {
            id: comments.iter().map(|stored| stored.id).max().unwrap_or(0) + 1,
            subject_id: comment.subject_id.clone(),
            media: comment.media.clone(),
            content: comment.content.as_ref().to_owned(),
            author_name: comment.author_name.clone(),
            created_at: self.now(),
        };
        comments.push(stored.clone());
        Ok(stored)
    }
}
