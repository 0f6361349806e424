//! PostgreSQL-backed `AlertPreferenceRepository` implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AlertPreferenceRepository, AlertPreferenceRepositoryError};
use crate::domain::{AlertFrequency, AlertPreference, AlertPreferenceUpdate, SubjectId};

use super::diesel_helpers::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{AlertPreferenceRow, AlertPreferenceWrite};
use super::pool::DbPool;
use super::schema::alert_preferences;

#[derive(Clone)]
pub struct DieselAlertPreferenceRepository {
    pool: DbPool,
}

impl DieselAlertPreferenceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_preference(row: AlertPreferenceRow) -> AlertPreference {
    let frequency = row.frequency.parse().unwrap_or_else(|_| {
        warn!(
            value = %row.frequency,
            "unrecognised alert frequency in storage, defaulting to weekly"
        );
        AlertFrequency::default()
    });
    AlertPreference {
        frequency,
        keywords: row.keywords,
        channels: row.channels,
        updated_at: Some(row.updated_at),
    }
}

#[async_trait]
impl AlertPreferenceRepository for DieselAlertPreferenceRepository {
    async fn find(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<AlertPreference>, AlertPreferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AlertPreferenceRow> = alert_preferences::table
            .find(subject_id.as_ref())
            .select(AlertPreferenceRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_preference))
    }

    async fn upsert(
        &self,
        subject_id: &SubjectId,
        update: &AlertPreferenceUpdate,
    ) -> Result<AlertPreference, AlertPreferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let write = AlertPreferenceWrite {
            subject_id: subject_id.as_ref(),
            frequency: update.frequency().as_str(),
            keywords: update.keywords(),
            channels: update.channels(),
            updated_at: Utc::now(),
        };

        let row: AlertPreferenceRow = diesel::insert_into(alert_preferences::table)
            .values(&write)
            .on_conflict(alert_preferences::subject_id)
            .do_update()
            .set((
                alert_preferences::frequency.eq(excluded(alert_preferences::frequency)),
                alert_preferences::keywords.eq(excluded(alert_preferences::keywords)),
                alert_preferences::channels.eq(excluded(alert_preferences::channels)),
                alert_preferences::updated_at.eq(excluded(alert_preferences::updated_at)),
            ))
            .returning(AlertPreferenceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    AlertPreferenceRepositoryError::unknown_user(subject_id.as_ref())
                } else {
                    map_diesel_error(err)
                }
            })?;
        Ok(row_to_preference(row))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn row(frequency: &str) -> AlertPreferenceRow {
        AlertPreferenceRow {
            frequency: frequency.to_owned(),
            keywords: "heist".to_owned(),
            channels: "email".to_owned(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    #[case("daily", AlertFrequency::Daily)]
    #[case("monthly", AlertFrequency::Monthly)]
    #[case("fortnightly", AlertFrequency::Weekly)]
    fn converts_stored_frequency(#[case] stored: &str, #[case] expected: AlertFrequency) {
        let preference = row_to_preference(row(stored));
        assert_eq!(preference.frequency, expected);
        assert!(preference.updated_at.is_some());
    }
}
