//! Joining configured role annotations with fetched snapshots.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::PresenceSnapshot;

/// Static display annotation for one tracked identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAnnotation {
    pub identity: String,
    pub role: String,
    pub description: Option<String>,
}

/// A snapshot merged with its role annotation; one card on the about view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamMember {
    #[serde(flatten)]
    pub presence: PresenceSnapshot,
    pub role: String,
    pub description: Option<String>,
}

impl TeamMember {
    pub fn identity(&self) -> &str {
        &self.presence.identity
    }
}

/// Team members keyed by identity, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    members: Vec<TeamMember>,
    index: HashMap<String, usize>,
}

impl TeamRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member. A second insert for the same identity replaces the
    /// value but keeps the original position.
    pub fn insert(&mut self, member: TeamMember) {
        match self.index.get(member.identity()) {
            Some(&pos) => self.members[pos] = member,
            None => {
                self.index
                    .insert(member.identity().to_string(), self.members.len());
                self.members.push(member);
            }
        }
    }

    pub fn get(&self, identity: &str) -> Option<&TeamMember> {
        self.index.get(identity).map(|&pos| &self.members[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TeamMember> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<'a> IntoIterator for &'a TeamRoster {
    type Item = &'a TeamMember;
    type IntoIter = std::slice::Iter<'a, TeamMember>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Merge annotations with the snapshots that were fetched successfully.
///
/// Identity is the only join key. Annotations without a snapshot are
/// omitted, as are snapshots nobody annotated. Roster order follows the
/// annotation order.
pub fn join_roster<I>(annotations: &[RoleAnnotation], snapshots: I) -> TeamRoster
where
    I: IntoIterator<Item = PresenceSnapshot>,
{
    let by_identity: HashMap<String, PresenceSnapshot> = snapshots
        .into_iter()
        .map(|snap| (snap.identity.clone(), snap))
        .collect();

    let mut roster = TeamRoster::new();
    for annotation in annotations {
        let presence = match by_identity.get(&annotation.identity) {
            Some(snap) => snap.clone(),
            None => continue,
        };
        roster.insert(TeamMember {
            presence,
            role: annotation.role.clone(),
            description: annotation.description.clone(),
        });
    }
    roster
}
