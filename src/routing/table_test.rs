use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Page {
    Home,
    Item,
    ItemNew,
    Missing,
}

fn table(entries: &[(&str, Page)]) -> RouteTable<Page> {
    RouteTable::new(entries.iter().map(|(p, v)| (*p, *v))).unwrap()
}

fn found(table: &RouteTable<Page>, path: &str) -> (Page, Params) {
    match table.match_path(path) {
        RouteMatch::Found { view, params } => (*view, params),
        RouteMatch::NotFound => panic!("no route for {path:?}"),
    }
}

// =============================================================
// validation
// =============================================================

#[test]
fn new_accepts_catch_all_last() {
    let t = table(&[("/", Page::Home), ("*", Page::Missing)]);
    assert!(t.has_catch_all());
    assert_eq!(t.len(), 2);
}

#[test]
fn new_rejects_catch_all_before_other_routes() {
    let err = RouteTable::new([("*", Page::Missing), ("/", Page::Home)]).unwrap_err();
    assert_eq!(err, RouteTableError::MisplacedCatchAll { index: 0, len: 2 });
}

#[test]
fn new_rejects_two_catch_alls() {
    let err = RouteTable::new([("/", Page::Home), ("*", Page::Missing), ("*", Page::Missing)]).unwrap_err();
    assert_eq!(err, RouteTableError::DuplicateCatchAll);
}

#[test]
fn new_reports_offending_pattern() {
    let err = RouteTable::new([("/", Page::Home), ("item/:id", Page::Item)]).unwrap_err();
    assert_eq!(
        err,
        RouteTableError::InvalidPattern {
            pattern: "item/:id".to_owned(),
            source: PatternError::MissingLeadingSlash,
        }
    );
}

#[test]
fn empty_table_matches_nothing() {
    let t: RouteTable<Page> = RouteTable::new(Vec::<(&str, Page)>::new()).unwrap();
    assert!(t.is_empty());
    assert_eq!(t.match_path("/"), RouteMatch::NotFound);
}

// =============================================================
// matching
// =============================================================

#[test]
fn parameterized_route_returns_params() {
    let t = table(&[("/x/:id", Page::Item)]);
    let (view, params) = found(&t, "/x/42");
    assert_eq!(view, Page::Item);
    assert_eq!(params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn literal_route_has_empty_params() {
    let t = table(&[("/", Page::Home)]);
    let (view, params) = found(&t, "/");
    assert_eq!(view, Page::Home);
    assert!(params.is_empty());
}

#[test]
fn first_declared_match_wins() {
    let t = table(&[("/item/new", Page::ItemNew), ("/item/:id", Page::Item)]);
    assert_eq!(found(&t, "/item/new").0, Page::ItemNew);
    assert_eq!(found(&t, "/item/7").0, Page::Item);

    let reversed = table(&[("/item/:id", Page::Item), ("/item/new", Page::ItemNew)]);
    let (view, params) = found(&reversed, "/item/new");
    assert_eq!(view, Page::Item);
    assert_eq!(params.get("id").map(String::as_str), Some("new"));
}

#[test]
fn unmatched_paths_fall_to_catch_all() {
    let t = table(&[("/", Page::Home), ("/item/:id", Page::Item), ("*", Page::Missing)]);
    for path in ["/nope", "/item", "/item/1/extra", "", "/item/"] {
        assert_eq!(found(&t, path).0, Page::Missing, "path {path:?}");
    }
}

#[test]
fn unmatched_path_without_catch_all_is_not_found() {
    let t = table(&[("/", Page::Home), ("/x/:id", Page::Item)]);
    assert_eq!(t.match_path("/x/42/extra"), RouteMatch::NotFound);
    assert_eq!(t.match_path("/elsewhere").view(), None);
}

#[test]
fn matching_is_repeatable() {
    let t = table(&[("/x/:id", Page::Item), ("*", Page::Missing)]);
    assert_eq!(t.match_path("/x/9"), t.match_path("/x/9"));
}

#[test]
fn entries_preserve_declaration_order() {
    let t = table(&[("/", Page::Home), ("/x/:id", Page::Item), ("*", Page::Missing)]);
    let patterns: Vec<&str> = t.entries().map(|(p, _)| p).collect();
    assert_eq!(patterns, ["/", "/x/:id", "*"]);
}
