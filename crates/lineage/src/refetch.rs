use superglue_protocol::LineageQuery;

/// Whether moving from `previous` to `next` needs a new lineage fetch.
///
/// True on first selection, on a different entity (name or type), and on a
/// depth change for the same entity.
pub fn should_refetch(previous: Option<&LineageQuery>, next: &LineageQuery) -> bool {
    match previous {
        None => true,
        Some(previous) => !previous.same_entity(next) || previous.depth != next.depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use superglue_protocol::Depth;

    fn query(name: &str, entity_type: &str, depth: Depth) -> LineageQuery {
        LineageQuery::new(name, entity_type, depth).unwrap()
    }

    #[test]
    fn first_selection_fetches() {
        assert!(should_refetch(None, &query("A", "table", Depth::default())));
    }

    #[test]
    fn identical_selection_does_not_fetch() {
        let a = query("A", "table", Depth::Full);
        assert!(!should_refetch(Some(&a), &a.clone()));
    }

    #[test]
    fn name_type_or_depth_change_fetches() {
        let a = query("A", "table", Depth::default());
        assert!(should_refetch(Some(&a), &query("B", "table", Depth::default())));
        assert!(should_refetch(Some(&a), &query("A", "job", Depth::default())));
        assert!(should_refetch(Some(&a), &a.with_depth(Depth::Full)));
    }
}
