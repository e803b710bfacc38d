//! View context: serializable rendering payload built from the record list.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use enrol_core::{search, StudentRecord};

use crate::error::RenderError;

/// Everything the card grid and the table need to render.
///
/// `cards` follows the search query; `rows` always lists every record.
/// Both carry the canonical record position so actions map back to the
/// store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewContext {
    pub total: usize,
    pub query: String,
    pub cards: Vec<CardCtx>,
    pub rows: Vec<RowCtx>,
    pub empty: Option<EmptyState>,
    /// Latest status message for the live region, if any.
    pub announcement: Option<String>,
    pub meta: MetaCtx,
}

/// One profile card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCtx {
    pub position: usize,
    pub id: u64,
    pub full_name: String,
    pub initials: String,
    pub email: String,
    pub programme: String,
    pub year: String,
    /// `None` when only the placeholder is stored.
    pub interests: Option<String>,
    pub photo_url: Option<String>,
}

/// One table row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowCtx {
    pub position: usize,
    pub full_name: String,
    pub email: String,
    pub programme: String,
    pub year: String,
    pub created_at: String,
}

/// Why the card grid has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    NoProfiles,
    NoMatches,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub enrol_version: String,
}

impl ViewContext {
    /// Build the context for `records` with the card grid filtered by `query`.
    pub fn build(records: &[StudentRecord], query: &str) -> Self {
        let cards: Vec<CardCtx> = search::filter(records, query)
            .map(|(position, r)| CardCtx {
                position,
                id: r.id.0,
                full_name: r.full_name(),
                initials: r.initials(),
                email: r.email.clone(),
                programme: r.programme.clone(),
                year: r.year.clone(),
                interests: r.has_interests().then(|| r.interests.clone()),
                photo_url: r.photo().map(str::to_string),
            })
            .collect();

        let rows = records
            .iter()
            .enumerate()
            .map(|(position, r)| RowCtx {
                position,
                full_name: r.full_name(),
                email: r.email.clone(),
                programme: r.programme.clone(),
                year: r.year.clone(),
                created_at: r.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            })
            .collect();

        let empty = match (records.is_empty(), cards.is_empty()) {
            (true, _) => Some(EmptyState::NoProfiles),
            (false, true) => Some(EmptyState::NoMatches),
            (false, false) => None,
        };

        ViewContext {
            total: records.len(),
            query: query.trim().to_string(),
            cards,
            rows,
            empty,
            announcement: None,
            meta: MetaCtx {
                enrol_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn with_announcement(mut self, message: Option<String>) -> Self {
        self.announcement = message;
        self
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use enrol_core::{StudentId, INTERESTS_PLACEHOLDER};

    fn rec(id: u64, first: &str, interests: &str, photo: &str) -> StudentRecord {
        StudentRecord {
            id: StudentId(id),
            first_name: first.into(),
            last_name: "Lee".into(),
            email: format!("{}@x.com", first.to_lowercase()),
            programme: "CS".into(),
            year: "2".into(),
            interests: interests.into(),
            photo_url: photo.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_list_is_no_profiles() {
        let ctx = ViewContext::build(&[], "");
        assert_eq!(ctx.empty, Some(EmptyState::NoProfiles));
        assert_eq!(ctx.total, 0);
    }

    #[test]
    fn unmatched_query_is_no_matches_but_rows_stay_full() {
        let records = vec![rec(1, "Ana", "chess", ""), rec(2, "Bo", INTERESTS_PLACEHOLDER, "")];
        let ctx = ViewContext::build(&records, "zzz");
        assert_eq!(ctx.empty, Some(EmptyState::NoMatches));
        assert!(ctx.cards.is_empty());
        assert_eq!(ctx.rows.len(), 2);
    }

    #[test]
    fn cards_keep_canonical_positions() {
        let records = vec![rec(1, "Ana", "chess", ""), rec(2, "Bo", INTERESTS_PLACEHOLDER, "https://x.com/b.png")];
        let ctx = ViewContext::build(&records, "bo");
        assert_eq!(ctx.cards.len(), 1);
        let card = &ctx.cards[0];
        assert_eq!(card.position, 1);
        assert_eq!(card.initials, "BL");
        assert_eq!(card.interests, None);
        assert_eq!(card.photo_url.as_deref(), Some("https://x.com/b.png"));
    }

    #[test]
    fn to_tera_context_succeeds() {
        let ctx = ViewContext::build(&[rec(1, "Ana", "chess", "")], "");
        ctx.to_tera_context().expect("context conversion");
    }
}
