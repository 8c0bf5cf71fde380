//! Client-side room title search and name resolution.

use crate::types::Room;

/// Keep rooms whose title contains `query`, ignoring case. Order is preserved.
pub fn filter_rooms_by_title(rooms: Vec<Room>, query: &str) -> Vec<Room> {
    let needle = query.trim().to_lowercase();
    rooms
        .into_iter()
        .filter(|r| r.title.to_lowercase().contains(&needle))
        .collect()
}

/// Outcome of resolving a room title to a single room.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleMatch {
    NotFound,
    Unique(Room),
    /// Several candidates and no way to pick one without guessing.
    Ambiguous(Vec<Room>),
}

/// Resolve a title against candidates that already matched by substring.
///
/// A single case-insensitive exact match wins over any number of partial
/// matches; otherwise exactly one candidate is required.
pub fn resolve_room_title(mut candidates: Vec<Room>, title: &str) -> TitleMatch {
    let wanted = title.trim().to_lowercase();

    let exact: Vec<&Room> = candidates
        .iter()
        .filter(|r| r.title.trim().to_lowercase() == wanted)
        .collect();
    if exact.len() == 1 {
        return TitleMatch::Unique(exact[0].clone());
    }

    match candidates.len() {
        0 => TitleMatch::NotFound,
        1 => TitleMatch::Unique(candidates.remove(0)),
        _ => TitleMatch::Ambiguous(candidates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: &str, title: &str) -> Room {
        Room {
            id: id.to_string(),
            title: title.to_string(),
            room_type: "group".to_string(),
            is_locked: false,
            team_id: None,
            creator_id: None,
            created: None,
            last_activity: None,
        }
    }

    #[test]
    fn test_filter_case_insensitive() {
        let rooms = vec![room("1", "Engineering Team"), room("2", "Marketing")];
        let found = filter_rooms_by_title(rooms, "eng");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_filter_upper_query() {
        let rooms = vec![room("1", "engineering standup"), room("2", "Sales")];
        let found = filter_rooms_by_title(rooms, "ENGINEERING");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_filter_preserves_order() {
        let rooms = vec![room("a", "Team B"), room("b", "Team A"), room("c", "Other")];
        let ids: Vec<_> = filter_rooms_by_title(rooms, "team")
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_resolve_not_found() {
        assert_eq!(resolve_room_title(vec![], "x"), TitleMatch::NotFound);
    }

    #[test]
    fn test_resolve_single_partial() {
        let result = resolve_room_title(vec![room("1", "Engineering Team")], "Engineering");
        assert_eq!(result, TitleMatch::Unique(room("1", "Engineering Team")));
    }

    #[test]
    fn test_resolve_exact_beats_partial() {
        let candidates = vec![room("1", "Design Review"), room("2", "design")];
        match resolve_room_title(candidates, "Design") {
            TitleMatch::Unique(r) => assert_eq!(r.id, "2"),
            other => panic!("expected unique match, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_ambiguous() {
        let candidates = vec![room("1", "Ops East"), room("2", "Ops West")];
        match resolve_room_title(candidates, "Ops") {
            TitleMatch::Ambiguous(rooms) => assert_eq!(rooms.len(), 2),
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_duplicate_exact_is_ambiguous() {
        let candidates = vec![room("1", "Ops"), room("2", "ops")];
        assert!(matches!(
            resolve_room_title(candidates, "Ops"),
            TitleMatch::Ambiguous(_)
        ));
    }
}
