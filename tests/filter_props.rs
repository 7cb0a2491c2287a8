//! Property tests for the filter semantics: the filtered view is always a
//! subset of the input satisfying every active predicate, and empty filters
//! are the identity.

use oxo::directory::model::{Agent, AgentDraft, AgentStatus, Platform};
use oxo::directory::{apply_filters, AgentFilters};
use proptest::prelude::*;

fn platform_strategy() -> impl Strategy<Value = Option<Platform>> {
    prop_oneof![
        Just(None),
        Just(Some(Platform::Whatsapp)),
        Just(Some(Platform::Telegram)),
        Just(Some(Platform::Signal)),
    ]
}

fn status_strategy() -> impl Strategy<Value = AgentStatus> {
    prop_oneof![
        Just(AgentStatus::Active),
        Just(AgentStatus::Inactive),
        Just(AgentStatus::Suspended),
        Just(AgentStatus::Pending),
    ]
}

prop_compose! {
    fn agent_strategy()(
        name in "[A-Za-z]{1,12}",
        platform in platform_strategy(),
        status in status_strategy(),
        rating in 0.0f32..=5.0,
        verified in any::<bool>(),
        category in prop_oneof![Just(None), Just(Some("travel".to_string())), Just(Some("logistics".to_string()))],
    ) -> Agent {
        let mut agent = AgentDraft { name, ..Default::default() }.into_agent();
        agent.platform = platform;
        agent.status = status;
        agent.rating = rating;
        agent.is_verified = verified;
        agent.category = category;
        agent
    }
}

prop_compose! {
    fn filters_strategy()(
        search in prop_oneof![Just(None), Just(Some("a".to_string())), Just(Some("zz".to_string()))],
        platform in platform_strategy(),
        status in prop_oneof![Just(None), status_strategy().prop_map(Some)],
        min_rating in prop_oneof![Just(None), (0.0f32..=5.0).prop_map(Some)],
        verified_only in any::<bool>(),
        category in prop_oneof![Just(None), Just(Some("travel".to_string()))],
    ) -> AgentFilters {
        AgentFilters { search, platform, category, status, min_rating, verified_only }
    }
}

proptest! {
    #[test]
    fn filtered_view_is_a_satisfying_subset(
        agents in proptest::collection::vec(agent_strategy(), 0..20),
        filters in filters_strategy(),
    ) {
        let filtered = apply_filters(&agents, &filters);
        prop_assert!(filtered.len() <= agents.len());
        for agent in &filtered {
            // Every element came from the input...
            prop_assert!(agents.iter().any(|a| a.id == agent.id));
            // ...and satisfies each active predicate conjunctively.
            if let Some(platform) = filters.platform {
                prop_assert_eq!(agent.platform, Some(platform));
            }
            if let Some(status) = filters.status {
                prop_assert_eq!(agent.status, status);
            }
            if let Some(min) = filters.min_rating {
                prop_assert!(agent.rating >= min);
            }
            if filters.verified_only {
                prop_assert!(agent.is_verified);
            }
            if let Some(category) = &filters.category {
                prop_assert!(agent
                    .category
                    .as_deref()
                    .map_or(false, |c| c.eq_ignore_ascii_case(category)));
            }
        }
    }

    #[test]
    fn empty_filters_are_the_identity(
        agents in proptest::collection::vec(agent_strategy(), 0..20),
    ) {
        let filtered = apply_filters(&agents, &AgentFilters::default());
        prop_assert_eq!(filtered.len(), agents.len());
    }

    #[test]
    fn rejected_agents_violate_some_predicate(
        agents in proptest::collection::vec(agent_strategy(), 0..20),
        filters in filters_strategy(),
    ) {
        let filtered = apply_filters(&agents, &filters);
        for agent in &agents {
            let kept = filtered.iter().any(|a| a.id == agent.id);
            prop_assert_eq!(kept, filters.matches(agent));
        }
    }
}
