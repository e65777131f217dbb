use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use vaultview_table::{
    CellValue, ColumnDef, EngineConfig, FilterTarget, PaginationState, SortKey, SortState,
    TableEngine, TableGesture, TableRow,
};

#[derive(Debug, Clone, PartialEq)]
struct Job {
    id: u32,
    name: String,
    status: i64,
}

impl Job {
    fn new(id: u32, name: &str, status: i64) -> Self {
        Self {
            id,
            name: name.to_string(),
            status,
        }
    }
}

impl TableRow for Job {
    fn id(&self) -> String {
        format!("job-{}", self.id)
    }
}

fn columns() -> Vec<ColumnDef<Job>> {
    vec![
        ColumnDef::new("name", |j: &Job| j.name.as_str().into()).sortable(),
        ColumnDef::new("status", |j: &Job| j.status.into())
            .sortable()
            .hidable(),
    ]
}

fn jobs(count: u32) -> Vec<Job> {
    (0..count)
        .map(|i| Job::new(i, &format!("job {i:03}"), i64::from(i % 3)))
        .collect()
}

#[test]
fn visible_page_is_a_subset_of_data_matching_the_filter() {
    let data = jobs(30);
    let mut engine = TableEngine::new(data.clone(), columns(), EngineConfig::default());
    let view = engine.set_global_filter("job 01");

    assert!(!view.visible_page.is_empty());
    for row in &view.visible_page {
        assert!(data.contains(row));
        assert!(row.name.contains("job 01"));
    }
}

#[test]
fn sorting_is_stable_and_repeatable() {
    // All rows tie on status within a group; ties must keep insertion order.
    let data = vec![
        Job::new(0, "c", 1),
        Job::new(1, "a", 1),
        Job::new(2, "b", 1),
        Job::new(3, "d", 0),
    ];
    let mut engine = TableEngine::new(data, columns(), EngineConfig::default());

    let first = engine.set_sorting(SortState::from_keys([SortKey::asc("status")]));
    let second = engine.set_sorting(SortState::from_keys([SortKey::asc("status")]));

    let order: Vec<u32> = first.visible_page.iter().map(|j| j.id).collect();
    assert_eq!(order, vec![3, 0, 1, 2]);
    assert_eq!(first.visible_page, second.visible_page);
}

#[test]
fn two_key_sort_tie_breaks_left_to_right() {
    let data = vec![
        Job::new(0, "b", 1),
        Job::new(1, "a", 1),
        Job::new(2, "a", 0),
    ];
    let mut engine = TableEngine::new(data, columns(), EngineConfig::default());
    let view = engine.set_sorting(SortState::from_keys([
        SortKey::asc("name"),
        SortKey::asc("status"),
    ]));

    let order: Vec<(String, i64)> = view
        .visible_page
        .iter()
        .map(|j| (j.name.clone(), j.status))
        .collect();
    assert_eq!(
        order,
        vec![
            ("a".to_string(), 0),
            ("a".to_string(), 1),
            ("b".to_string(), 1),
        ]
    );
}

#[test]
fn shrinking_filter_clamps_the_page_index_to_the_last_valid_page() {
    // 50 rows at size 10 is 5 pages; a filter matching 12 rows leaves 2.
    let data: Vec<Job> = (0..50)
        .map(|i| {
            let name = if i < 12 { format!("match {i}") } else { format!("other {i}") };
            Job::new(i, &name, 0)
        })
        .collect();
    let mut engine = TableEngine::new(data, columns(), EngineConfig::default());

    let view = engine.set_pagination(PaginationState {
        page_index: 4,
        page_size: 10,
    });
    assert_eq!(view.page_count, 5);
    assert_eq!(view.pagination.page_index, 4);

    let view = engine.set_global_filter("match");
    assert_eq!(view.page_count, 2);
    assert_eq!(view.pagination.page_index, 1);
    assert_eq!(view.visible_page.len(), 2);
}

#[test]
fn page_index_is_always_in_range_after_set_pagination() {
    let mut engine = TableEngine::new(jobs(5), columns(), EngineConfig::default());
    let view = engine.set_pagination(PaginationState {
        page_index: 999,
        page_size: 10,
    });
    assert_eq!(view.page_count, 1);
    assert_eq!(view.pagination.page_index, 0);

    let view = engine.set_data(Vec::new());
    assert_eq!(view.page_count, 1);
    assert_eq!(view.pagination.page_index, 0);
    assert!(view.visible_page.is_empty());
}

#[test]
fn page_index_survives_data_mutation_that_keeps_the_page_count() {
    let mut engine = TableEngine::new(jobs(30), columns(), EngineConfig::default());
    engine.set_pagination(PaginationState {
        page_index: 2,
        page_size: 10,
    });

    // Same page count after the reload, so the user stays mid-browse.
    let view = engine.set_data(jobs(25));
    assert_eq!(view.page_count, 3);
    assert_eq!(view.pagination.page_index, 2);
}

#[test]
fn selection_survives_sort_filter_and_visibility_changes() {
    let config = EngineConfig {
        enable_row_selection: true,
        ..EngineConfig::default()
    };
    let mut engine = TableEngine::new(jobs(10), columns(), config);
    engine.toggle_selection("job-4");

    engine.toggle_sort("name");
    engine.set_global_filter("job 00");
    let view =
        engine.set_column_visibility(HashMap::from([("status".to_string(), false)]));

    let selected: Vec<String> = view.selected_rows.iter().map(TableRow::id).collect();
    assert_eq!(selected, vec!["job-4".to_string()]);
}

#[test]
fn selection_is_pruned_when_the_row_leaves_the_data() {
    let config = EngineConfig {
        enable_row_selection: true,
        ..EngineConfig::default()
    };
    let mut engine = TableEngine::new(jobs(10), columns(), config);
    engine.toggle_selection("job-4");
    engine.toggle_selection("job-5");

    let view = engine.set_data(jobs(5));
    let selected: Vec<String> = view.selected_rows.iter().map(TableRow::id).collect();
    assert_eq!(selected, vec!["job-4".to_string()]);
    assert_eq!(engine.selected_ids(), vec!["job-4".to_string()]);
}

#[test]
fn disabled_capabilities_are_silent_no_ops() {
    let config = EngineConfig {
        enable_sorting: false,
        enable_filtering: false,
        enable_row_selection: false,
        enable_column_visibility: false,
        ..EngineConfig::default()
    };
    let mut engine = TableEngine::new(jobs(10), columns(), config);
    let baseline = engine.view();

    let after_filter = engine.set_column_filter("name", "job 001");
    let after_sort = engine.toggle_sort("name");
    let after_select = engine.set_row_selection(HashSet::from(["job-1".to_string()]));
    let after_hide =
        engine.set_column_visibility(HashMap::from([("status".to_string(), false)]));

    for view in [after_filter, after_sort, after_select, after_hide] {
        assert_eq!(view.visible_page.len(), baseline.visible_page.len());
        assert!(view.selected_rows.is_empty());
    }
}

#[test]
fn unsortable_columns_are_ignored_by_sort_operations() {
    let cols = vec![
        ColumnDef::new("name", |j: &Job| j.name.as_str().into()),
        ColumnDef::new("status", |j: &Job| j.status.into()).sortable(),
    ];
    let mut engine = TableEngine::new(jobs(5), cols, EngineConfig::default());

    engine.toggle_sort("name");
    assert!(engine.sort_state().is_empty());

    engine.set_sorting(SortState::from_keys([
        SortKey::asc("name"),
        SortKey::desc("status"),
    ]));
    assert_eq!(engine.sort_state().keys(), &[SortKey::desc("status")]);
}

#[test]
fn non_hidable_columns_cannot_be_hidden() {
    let mut engine = TableEngine::new(jobs(5), columns(), EngineConfig::default());
    engine.set_column_visibility(HashMap::from([
        ("name".to_string(), false),
        ("status".to_string(), false),
    ]));
    assert!(engine.visibility_state().is_visible("name"));
    assert!(!engine.visibility_state().is_visible("status"));
}

#[test]
fn manual_pagination_trusts_the_caller_slice_and_count() {
    let config = EngineConfig {
        manual_pagination: true,
        external_page_count: Some(7),
        ..EngineConfig::default()
    };
    // The caller hands in one pre-sliced page of backend data.
    let mut engine = TableEngine::new(jobs(10), columns(), config);
    let view = engine.view();
    assert_eq!(view.page_count, 7);
    assert_eq!(view.visible_page.len(), 10);

    let view = engine.set_external_page_count(3);
    assert_eq!(view.page_count, 3);
}

#[test]
fn page_size_gesture_fires_the_write_through_hook() {
    let mut engine = TableEngine::new(jobs(50), columns(), EngineConfig::default());
    let written = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&written);
    engine.on_page_size_change(move |size| {
        seen.store(size, Ordering::SeqCst);
    });

    let view = engine.apply(TableGesture::PageSizeChange(25));
    assert_eq!(view.pagination.page_size, 25);
    assert_eq!(view.page_count, 2);
    assert_eq!(written.load(Ordering::SeqCst), 25);

    // Restoring state programmatically must not write through.
    engine.set_pagination(PaginationState {
        page_index: 0,
        page_size: 10,
    });
    assert_eq!(written.load(Ordering::SeqCst), 25);
}

#[test]
fn gestures_route_to_the_matching_operations() {
    let config = EngineConfig {
        enable_row_selection: true,
        ..EngineConfig::default()
    };
    let mut engine = TableEngine::new(jobs(30), columns(), config);
    engine.set_pagination(PaginationState {
        page_index: 0,
        page_size: 10,
    });

    engine.apply(TableGesture::SortToggle("name".to_string()));
    assert!(engine.sort_state().contains("name"));

    let view = engine.apply(TableGesture::PageChange(1));
    assert_eq!(view.pagination.page_index, 1);

    engine.apply(TableGesture::FilterChange(
        FilterTarget::Column("status".to_string()),
        "1".to_string(),
    ));
    assert_eq!(engine.filter_state().column("status"), Some("1"));

    engine.apply(TableGesture::FilterChange(
        FilterTarget::Global,
        "job".to_string(),
    ));
    assert_eq!(engine.filter_state().global(), "job");

    let view = engine.apply(TableGesture::SelectionToggle("job-1".to_string()));
    assert_eq!(view.selected_rows.len(), 1);
}

#[test]
fn initial_config_state_is_applied() {
    let config = EngineConfig {
        initial_sort: Some(SortState::from_keys([SortKey::desc("name")])),
        initial_column_filters: vec![("status".to_string(), "1".to_string())],
        initial_column_visibility: Some(HashMap::from([("status".to_string(), false)])),
        ..EngineConfig::default()
    };
    let mut engine = TableEngine::new(jobs(9), columns(), config);

    assert_eq!(engine.sort_state().keys(), &[SortKey::desc("name")]);
    assert_eq!(engine.filter_state().column("status"), Some("1"));
    assert!(!engine.visibility_state().is_visible("status"));

    let view = engine.view();
    assert!(view.visible_page.iter().all(|j| j.status == 1));
    let names: Vec<&str> = view.visible_page.iter().map(|j| j.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.reverse();
    assert_eq!(names, sorted);
}

#[test]
fn null_cells_sort_before_values() {
    let cols = vec![
        ColumnDef::new("name", |j: &Job| {
            if j.name.is_empty() {
                CellValue::Null
            } else {
                j.name.as_str().into()
            }
        })
        .sortable(),
    ];
    let data = vec![Job::new(0, "b", 0), Job::new(1, "", 0), Job::new(2, "a", 0)];
    let mut engine = TableEngine::new(data, cols, EngineConfig::default());
    let view = engine.set_sorting(SortState::from_keys([SortKey::asc("name")]));
    let order: Vec<u32> = view.visible_page.iter().map(|j| j.id).collect();
    assert_eq!(order, vec![1, 2, 0]);
}
