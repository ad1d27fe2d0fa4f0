//! Calendar export: fetch, render, write.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use wowcal_core::render_calendar;
use wowcal_providers::{CalendarSource, FetchOptions, fetch_calendar};

use crate::config::ExportSettings;
use crate::error::ClientResult;

/// What one export run produced.
#[derive(Debug)]
pub struct ExportSummary {
    /// Where the calendar was written.
    pub path: PathBuf,
    /// Number of events in the calendar.
    pub events: usize,
    /// Number of events or categories that were skipped.
    pub skipped: usize,
}

/// The file name used when no output file is configured.
pub fn default_file_name(character: &str, realm: &str) -> PathBuf {
    PathBuf::from(format!("wowcal-{}-{}.ical", character, realm))
}

/// Writes a rendered calendar, replacing any existing file.
pub fn write_calendar(path: &Path, document: &str) -> ClientResult<()> {
    std::fs::write(path, document)?;
    Ok(())
}

/// Runs one export against `source` and writes the result.
///
/// # Errors
///
/// Fails if login fails or the file cannot be written. Skipped events are
/// logged and counted, not returned as errors.
pub async fn export(
    source: &dyn CalendarSource,
    settings: &ExportSettings,
) -> ClientResult<ExportSummary> {
    info!(month = %settings.month, "Exporting calendar");

    let options = FetchOptions::new(settings.month).with_selection(settings.selection.clone());
    let result = fetch_calendar(source, &options).await?;

    if !result.is_complete() {
        warn!(
            skipped = result.skipped.len(),
            "Some events could not be exported"
        );
    }

    let document = render_calendar(&result.events);
    write_calendar(&settings.output, &document)?;

    info!(
        path = %settings.output.display(),
        events = result.events.len(),
        "Calendar exported"
    );

    Ok(ExportSummary {
        path: settings.output.clone(),
        events: result.events.len(),
        skipped: result.skipped.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use wowcal_core::{MonthRef, WorldCategory};
    use wowcal_providers::armory::ArmoryConfig;
    use wowcal_providers::{BoxFuture, CalendarSelection, ProviderError, ProviderResult};

    struct StaticSource {
        accept_login: bool,
    }

    impl CalendarSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        fn login(&self) -> BoxFuture<'_, ProviderResult<()>> {
            Box::pin(async move {
                if self.accept_login {
                    Ok(())
                } else {
                    Err(ProviderError::authentication("login rejected"))
                }
            })
        }

        fn user_month(&self, _month: MonthRef) -> BoxFuture<'_, ProviderResult<Option<Value>>> {
            Box::pin(async { Ok(Some(json!({"events": []}))) })
        }

        fn world_month(
            &self,
            _category: WorldCategory,
            _month: MonthRef,
        ) -> BoxFuture<'_, ProviderResult<Option<Value>>> {
            Box::pin(async {
                Ok(Some(json!({"events": [{
                    "summary": "Darkmoon Faire",
                    "start": 1_262_304_000_000_i64,
                    "end": 1_262_908_800_000_i64
                }]})))
            })
        }

        fn event_detail(&self, _event_id: i64) -> BoxFuture<'_, ProviderResult<Option<Value>>> {
            Box::pin(async { Ok(None) })
        }
    }

    fn settings(output: PathBuf) -> ExportSettings {
        ExportSettings {
            armory: ArmoryConfig::new("account", "secret", "Thrall", "Draenor").unwrap(),
            month: MonthRef::new(1, 2010).unwrap(),
            selection: CalendarSelection::default(),
            output,
            log_file: None,
            verbose: false,
        }
    }

    #[test]
    fn default_file_name_uses_character_and_realm() {
        assert_eq!(
            default_file_name("Thrall", "Draenor"),
            PathBuf::from("wowcal-Thrall-Draenor.ical")
        );
    }

    #[test]
    fn write_calendar_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ical");
        std::fs::write(&path, "old contents that are longer").unwrap();

        write_calendar(&path, "BEGIN:VCALENDAR\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "BEGIN:VCALENDAR\n");
    }

    #[tokio::test]
    async fn export_writes_calendar() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path().join("thrall.ical"));

        let summary = export(&StaticSource { accept_login: true }, &settings)
            .await
            .unwrap();

        assert_eq!(summary.events, 1);
        assert_eq!(summary.skipped, 0);
        let written = std::fs::read_to_string(&summary.path).unwrap();
        assert!(written.starts_with("BEGIN:VCALENDAR\n"));
        assert!(written.contains("SUMMARY:Darkmoon Faire\n"));
        assert!(written.ends_with("END:VCALENDAR\n"));
    }

    #[tokio::test]
    async fn failed_login_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings(dir.path().join("thrall.ical"));

        let err = export(&StaticSource { accept_login: false }, &settings)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("authentication_failed"));
        assert!(!settings.output.exists());
    }
}
