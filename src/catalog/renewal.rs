use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::catalog::records::{matches_search, parse_status_filter};
use crate::core::error::CatalogError;
use crate::models::card::{AccessCard, RenewalEntry, RenewalStatus, RenewalType, Urgency};
use crate::utils::time::{days_until, Clock};

pub const RENEWAL_DAYS: i64 = 365;
pub const EXTENSION_DAYS: i64 = 90;

pub fn urgency(expiry: NaiveDate, today: NaiveDate) -> Urgency {
    match days_until(expiry, today) {
        d if d < 0 => Urgency::Expired,
        d if d <= 7 => Urgency::Critical,
        d if d <= 30 => Urgency::Warning,
        _ => Urgency::Normal,
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    #[serde(flatten)]
    pub card: AccessCard,
    pub urgency: Urgency,
    pub badge: &'static str,
    pub days_until_expiry: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenewalSummary {
    pub total: usize,
    pub expired: usize,
    pub expiring: usize,
    pub active: usize,
}

/// Access cards and their renewal actions.
pub struct RenewalDesk {
    cards: RwLock<Vec<AccessCard>>,
    clock: Arc<dyn Clock>,
}

impl RenewalDesk {
    pub fn new(cards: Vec<AccessCard>, clock: Arc<dyn Clock>) -> Self {
        Self {
            cards: RwLock::new(cards),
            clock,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<AccessCard>> {
        self.cards.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<AccessCard>> {
        self.cards.write().unwrap_or_else(|e| e.into_inner())
    }

    fn view(&self, card: AccessCard, today: NaiveDate) -> CardView {
        let urgency = urgency(card.current_card_expiry, today);
        CardView {
            days_until_expiry: days_until(card.current_card_expiry, today),
            badge: urgency.label(),
            urgency,
            card,
        }
    }

    /// Search over name, employee id or department, filtered by renewal
    /// status and ordered most urgent first. Ties keep seed order.
    pub fn list(
        &self,
        search: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<CardView>, CatalogError> {
        let status: Option<RenewalStatus> = parse_status_filter(status)?;
        let needle = search.map(str::to_lowercase).unwrap_or_default();
        let today = self.clock.today();

        let mut cards: Vec<CardView> = self
            .read()
            .iter()
            .filter(|c| {
                matches_search(
                    &needle,
                    &[c.name.as_str(), c.employee_id.as_str(), c.department.as_str()],
                )
            })
            .filter(|c| status.map_or(true, |s| c.renewal_status == s))
            .cloned()
            .map(|c| self.view(c, today))
            .collect();

        cards.sort_by_key(|c| c.urgency);
        Ok(cards)
    }

    pub fn summary(&self) -> RenewalSummary {
        let today = self.clock.today();
        let cards = self.read();

        let mut summary = RenewalSummary {
            total: cards.len(),
            ..Default::default()
        };
        for card in cards.iter() {
            match urgency(card.current_card_expiry, today) {
                Urgency::Expired => summary.expired += 1,
                Urgency::Critical | Urgency::Warning => summary.expiring += 1,
                Urgency::Normal => summary.active += 1,
            }
        }
        summary
    }

    pub fn renew(&self, id: &str) -> Result<CardView, CatalogError> {
        let today = self.clock.today();
        let mut cards = self.write();
        let card = find_mut(&mut cards, id)?;

        renew_card(card, today);
        info!(id, name = %card.name, expiry = %card.current_card_expiry, "Card renewed");

        Ok(self.view(card.clone(), today))
    }

    /// Push the current expiry back by ninety days
    pub fn extend(&self, id: &str) -> Result<CardView, CatalogError> {
        let today = self.clock.today();
        let mut cards = self.write();
        let card = find_mut(&mut cards, id)?;

        card.current_card_expiry += Duration::days(EXTENSION_DAYS);
        info!(id, name = %card.name, expiry = %card.current_card_expiry, "Card expiry extended");

        Ok(self.view(card.clone(), today))
    }

    /// Renew every selected card. All ids are checked before anything
    /// changes.
    pub fn bulk_renew(&self, ids: &[String]) -> Result<Vec<CardView>, CatalogError> {
        if ids.is_empty() {
            return Err(CatalogError::NoSelection);
        }

        let today = self.clock.today();
        let mut cards = self.write();

        if let Some(missing) = ids.iter().find(|id| !cards.iter().any(|c| &c.id == *id)) {
            return Err(CatalogError::NotFound(format!("card {}", missing)));
        }

        let mut renewed = Vec::with_capacity(ids.len());
        for card in cards.iter_mut().filter(|c| ids.contains(&c.id)) {
            renew_card(card, today);
            renewed.push(self.view(card.clone(), today));
        }

        info!(count = renewed.len(), "Bulk renewal completed");
        Ok(renewed)
    }

    pub fn history(&self, id: &str) -> Result<Vec<RenewalEntry>, CatalogError> {
        self.read()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.renewal_history.clone())
            .ok_or_else(|| CatalogError::NotFound(format!("card {}", id)))
    }

    pub fn renewed_count(&self) -> usize {
        self.read()
            .iter()
            .filter(|c| c.renewal_status == RenewalStatus::Renewed)
            .count()
    }
}

fn find_mut<'a>(cards: &'a mut [AccessCard], id: &str) -> Result<&'a mut AccessCard, CatalogError> {
    cards
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| CatalogError::NotFound(format!("card {}", id)))
}

fn renew_card(card: &mut AccessCard, today: NaiveDate) {
    let expiry = today + Duration::days(RENEWAL_DAYS);
    card.renewal_status = RenewalStatus::Renewed;
    card.last_renewal_date = Some(today);
    card.current_card_expiry = expiry;
    card.renewal_history.push(RenewalEntry {
        date: today,
        kind: RenewalType::Renewal,
        expiry_date: expiry,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::fixtures::seed_cards;
    use crate::utils::time::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn desk(today: NaiveDate) -> RenewalDesk {
        let clock = Arc::new(FixedClock::new(today.and_hms_opt(9, 0, 0).unwrap()));
        RenewalDesk::new(seed_cards(), clock)
    }

    #[test]
    fn test_urgency_thresholds() {
        let today = date(2024, 11, 1);
        let cases = [
            (-1, Urgency::Expired),
            (0, Urgency::Critical),
            (7, Urgency::Critical),
            (8, Urgency::Warning),
            (30, Urgency::Warning),
            (31, Urgency::Normal),
        ];

        for (days, expected) in cases {
            assert_eq!(urgency(today + Duration::days(days), today), expected, "{} days", days);
        }
    }

    #[test]
    fn test_list_sorted_by_urgency() {
        let desk = desk(date(2024, 11, 15));

        let cards = desk.list(None, None).unwrap();
        let ids: Vec<_> = cards.iter().map(|c| c.card.id.as_str()).collect();
        // 1 expired, 4 critical (5 days), 2 normal (45 days), 3 normal
        assert_eq!(ids, vec!["1", "4", "2", "3"]);
        assert_eq!(cards[1].badge, "Expires Soon");
        assert_eq!(cards[1].days_until_expiry, 5);
    }

    #[test]
    fn test_list_search_and_status() {
        let desk = desk(date(2024, 11, 15));

        assert_eq!(desk.list(Some("finance"), None).unwrap().len(), 1);
        assert_eq!(desk.list(Some("emp00"), None).unwrap().len(), 4);
        assert_eq!(desk.list(None, Some("expiring")).unwrap().len(), 2);
        assert!(desk.list(None, Some("lost")).is_err());
    }

    #[test]
    fn test_summary() {
        let desk = desk(date(2024, 11, 15));
        assert_eq!(
            desk.summary(),
            RenewalSummary { total: 4, expired: 1, expiring: 1, active: 2 }
        );
    }

    #[test]
    fn test_renew() {
        let today = date(2024, 11, 15);
        let desk = desk(today);

        let view = desk.renew("1").unwrap();
        assert_eq!(view.card.renewal_status, RenewalStatus::Renewed);
        assert_eq!(view.card.last_renewal_date, Some(today));
        assert_eq!(view.card.current_card_expiry, date(2025, 11, 15));
        assert_eq!(view.urgency, Urgency::Normal);

        let history = desk.history("1").unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].kind, RenewalType::Renewal);
        assert_eq!(history[2].expiry_date, date(2025, 11, 15));
    }

    #[test]
    fn test_extend_adds_ninety_days() {
        let desk = desk(date(2024, 11, 15));

        let view = desk.extend("4").unwrap();
        assert_eq!(view.card.current_card_expiry, date(2025, 2, 18));
        assert_eq!(view.card.renewal_status, RenewalStatus::Expiring);
        assert!(desk.history("4").unwrap().is_empty());
    }

    #[test]
    fn test_bulk_renew() {
        let desk = desk(date(2024, 11, 15));

        assert!(matches!(desk.bulk_renew(&[]), Err(CatalogError::NoSelection)));

        let err = desk
            .bulk_renew(&["1".to_string(), "9".to_string()])
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert_eq!(desk.renewed_count(), 0);

        let renewed = desk.bulk_renew(&["1".to_string(), "4".to_string()]).unwrap();
        assert_eq!(renewed.len(), 2);
        assert_eq!(desk.renewed_count(), 2);
    }

    #[test]
    fn test_unknown_card() {
        let desk = desk(date(2024, 11, 15));
        assert!(matches!(desk.renew("x"), Err(CatalogError::NotFound(_))));
        assert!(matches!(desk.history("x"), Err(CatalogError::NotFound(_))));
    }
}
