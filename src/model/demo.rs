//! Random demo sessions.

use chrono::{Duration, NaiveDateTime};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use super::item::{Group, Item};
use super::session::Session;

/// Furthest back a demo session reaches, in days.
pub const MAX_DAYS_IN_PAST: u32 = 3650;

const GROUP_NAMES: &[&str] = &[
    "Ada", "Boris", "Chiara", "Dmitri", "Elena", "Farid", "Greta", "Hiro", "Ines", "Jonas",
    "Kaia", "Luca", "Mira", "Nils", "Oona", "Pavel", "Quinn", "Rosa", "Sven", "Tala",
];

const VERBS: &[&str] = &[
    "Compile", "Index", "Parse", "Reboot", "Synthesize", "Calculate", "Transmit", "Back up",
    "Quantify", "Navigate", "Bypass", "Override",
];

const NOUNS: &[&str] = &[
    "driver", "protocol", "bandwidth", "firewall", "array", "matrix", "pixel", "circuit",
    "sensor", "feed", "bus", "alarm",
];

/// Parameters for [`generate_demo_session`].
#[derive(Debug, Clone, Copy)]
pub struct DemoParams {
    pub group_count: usize,
    pub item_count: usize,
    pub days_in_past: u32,
    /// Fixed seed for reproducible sessions; random when `None`.
    pub seed: Option<u64>,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            group_count: 20,
            item_count: 200,
            days_in_past: 10,
            seed: None,
        }
    }
}

/// Build a session with random groups and items around `now`.
///
/// Items start on a quarter-hour between `days_in_past` days before `now`
/// and one day after it, and last between 30 minutes and 5 hours.
pub fn generate_demo_session(params: DemoParams, now: NaiveDateTime) -> Session {
    let mut rng = match params.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let groups: Vec<Group> = (0..params.group_count.max(1))
        .map(|i| {
            let base = GROUP_NAMES[i % GROUP_NAMES.len()];
            let mut group = if i < GROUP_NAMES.len() {
                Group::new(base)
            } else {
                Group::new(format!("{} {}", base, i / GROUP_NAMES.len() + 1))
            };
            group.right_title = format!("#{}", i + 1);
            group
        })
        .collect();

    let days_in_past = if params.days_in_past > MAX_DAYS_IN_PAST {
        warn!(
            requested = params.days_in_past,
            max = MAX_DAYS_IN_PAST,
            "demo window too long, clamped"
        );
        MAX_DAYS_IN_PAST
    } else {
        params.days_in_past
    };
    let quarters_back = i64::from(days_in_past) * 24 * 4;
    let quarters_ahead = 24 * 4;
    let window_start = now
        .checked_sub_signed(Duration::minutes(quarters_back * 15))
        .unwrap_or(now);

    let items = (0..params.item_count)
        .map(|_| {
            let group = &groups[rng.random_range(0..groups.len())];
            let offset = rng.random_range(0..quarters_back + quarters_ahead);
            let start = window_start + Duration::minutes(offset * 15);
            let length = rng.random_range(2..=20_i64);
            let end = start + Duration::minutes(length * 15);
            let title = format!(
                "{} the {}",
                VERBS[rng.random_range(0..VERBS.len())],
                NOUNS[rng.random_range(0..NOUNS.len())]
            );
            Item::new(title, group.id, start, end)
        })
        .collect();

    let mut session = Session::new("Demo Timeline");
    session.groups = groups;
    session.items = items;
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn params() -> DemoParams {
        DemoParams {
            group_count: 5,
            item_count: 60,
            days_in_past: 3,
            seed: Some(7),
        }
    }

    #[test]
    fn respects_counts_and_window() {
        let session = generate_demo_session(params(), now());
        assert_eq!(session.groups.len(), 5);
        assert_eq!(session.items.len(), 60);
        assert!(session.links.is_empty());

        let earliest = now() - Duration::days(3);
        let latest = now() + Duration::days(1);
        for item in &session.items {
            assert!(item.start >= earliest && item.start < latest);
            let minutes = (item.end - item.start).num_minutes();
            assert!((30..=300).contains(&minutes), "duration {minutes}");
            assert!(session.group(item.group).is_some());
        }
    }

    #[test]
    fn oversized_window_is_clamped() {
        let session = generate_demo_session(
            DemoParams {
                group_count: 1,
                item_count: 20,
                days_in_past: 200_000_000,
                seed: Some(1),
            },
            now(),
        );
        assert_eq!(session.items.len(), 20);

        let earliest = now() - Duration::days(i64::from(MAX_DAYS_IN_PAST));
        for item in &session.items {
            assert!(item.start >= earliest && item.start < now() + Duration::days(1));
        }
    }

    #[test]
    fn same_seed_gives_same_layout() {
        let a = generate_demo_session(params(), now());
        let b = generate_demo_session(params(), now());
        let spans = |s: &Session| -> Vec<_> {
            s.items.iter().map(|i| (i.start, i.end, i.title.clone())).collect()
        };
        assert_eq!(spans(&a), spans(&b));
    }

    #[test]
    fn group_names_stay_unique_past_the_name_list() {
        let session = generate_demo_session(
            DemoParams {
                group_count: GROUP_NAMES.len() + 3,
                ..params()
            },
            now(),
        );
        let mut titles: Vec<_> = session.groups.iter().map(|g| g.title.clone()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), GROUP_NAMES.len() + 3);
    }
}
