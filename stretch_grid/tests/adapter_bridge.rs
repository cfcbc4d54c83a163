//! Populating a `StretchGrid` from an adapter and forwarding item clicks.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use stretch_grid::*;

struct Label(String);

impl View for Label {
    fn measure(&self, width: MeasureSpec, height: MeasureSpec) -> Size {
        Size::new(width.resolve(self.0.len() as i32 * 8), height.resolve(16))
    }
}

fn labels(items: &[&str]) -> Rc<ArrayAdapter<String>> {
    ArrayAdapter::new(
        items.iter().map(|s| s.to_string()).collect(),
        |_, text: &String| -> Rc<dyn View> { Rc::new(Label(text.clone())) },
    )
}

/// An adapter whose odd positions are disabled and whose ids are offset.
/// With `all_enabled` set it still claims every item is enabled.
struct Sparse {
    count: usize,
    all_enabled: bool,
    observable: DataSetObservable,
    views_built: Cell<usize>,
}

impl Adapter for Sparse {
    fn count(&self) -> usize {
        self.count
    }

    fn view(&self, position: usize) -> Rc<dyn View> {
        self.views_built.set(self.views_built.get() + 1);
        Rc::new(Label(format!("#{position}")))
    }

    fn item_id(&self, position: usize) -> i64 {
        1000 + position as i64
    }

    fn is_enabled(&self, position: usize) -> bool {
        position % 2 == 0
    }

    fn are_all_items_enabled(&self) -> bool {
        self.all_enabled
    }

    fn register_observer(&self, observer: Weak<dyn DataSetObserver>) {
        self.observable.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn DataSetObserver>) {
        self.observable.unregister(observer);
    }
}

fn sparse(count: usize) -> Rc<Sparse> {
    Rc::new(Sparse {
        count,
        all_enabled: false,
        observable: DataSetObservable::new(),
        views_built: Cell::new(0),
    })
}

type Clicks = Rc<RefCell<Vec<(usize, i64)>>>;

fn record_clicks(grid: &StretchGrid) -> Clicks {
    let clicks: Clicks = Rc::default();
    let sink = clicks.clone();
    grid.on_item_click(move |_grid, _view, position, id| {
        sink.borrow_mut().push((position, id));
    });
    clicks
}

#[test]
fn adapter_views_become_children_in_order() {
    let adapter = labels(&["a", "b", "c", "d"]);
    let grid = StretchGrid::new();
    grid.set_adapter(Some(adapter.clone()));

    assert_eq!(grid.child_count(), 4);
    assert_eq!(grid.row_count(), 2);
    assert!(grid.is_layout_requested());
    assert!(adapter.get(2).is_some_and(|s| s == "c"));
}

#[test]
fn data_set_changes_rebuild_children() {
    let adapter = labels(&["a", "b"]);
    let grid = StretchGrid::new();
    grid.set_adapter(Some(adapter.clone()));
    let first = grid.child_at(0).unwrap();

    adapter.set_items(vec!["x".into(), "y".into(), "z".into()]);
    assert_eq!(grid.child_count(), 3);
    assert!(!Rc::ptr_eq(&first, &grid.child_at(0).unwrap()));

    adapter.push("w".into());
    assert_eq!(grid.child_count(), 4);

    adapter.clear();
    assert_eq!(grid.child_count(), 0);

    adapter.notify_data_set_invalidated();
    assert_eq!(grid.child_count(), 0);
}

#[test]
fn replacing_the_adapter_unsubscribes_from_the_old_one() {
    let old = labels(&["a", "b"]);
    let new = labels(&["c"]);
    let grid = StretchGrid::new();

    grid.set_adapter(Some(old.clone()));
    grid.set_adapter(Some(new.clone()));
    assert_eq!(grid.child_count(), 1);

    old.set_items(vec!["1".into(), "2".into(), "3".into()]);
    assert_eq!(grid.child_count(), 1);

    grid.set_adapter(None);
    assert_eq!(grid.child_count(), 0);
    new.set_items(vec!["1".into(), "2".into()]);
    assert_eq!(grid.child_count(), 0);
}

#[test]
fn clicks_report_position_and_row_id() {
    let adapter = sparse(5);
    let grid = StretchGrid::new();
    let clicks = record_clicks(&grid);
    grid.set_adapter(Some(adapter.clone()));
    assert_eq!(adapter.views_built.get(), 5);

    for index in 0..5 {
        grid.click_child(index);
    }
    // Disabled positions are not wired.
    assert_eq!(*clicks.borrow(), vec![(0, 1000), (2, 1002), (4, 1004)]);
    assert!(!grid.click_child(1));
    assert!(!grid.click_child(99));
}

#[test]
fn late_listener_wires_existing_children() {
    let grid = StretchGrid::new();
    grid.set_adapter(Some(labels(&["a", "b", "c"])));
    assert!(!grid.click_child(1));

    let clicks = record_clicks(&grid);
    assert!(grid.click_child(1));
    assert_eq!(*clicks.borrow(), vec![(1, 1)]);
}

#[test]
fn late_listener_skips_disabled_items() {
    let grid = StretchGrid::new();
    grid.set_adapter(Some(sparse(5)));
    let clicks = record_clicks(&grid);

    let fired: Vec<bool> = (0..5).map(|index| grid.click_child(index)).collect();
    assert_eq!(fired, vec![true, false, true, false, true]);
    assert_eq!(*clicks.borrow(), vec![(0, 1000), (2, 1002), (4, 1004)]);
}

#[test]
fn all_items_enabled_overrides_disabled_positions() {
    let adapter = Rc::new(Sparse {
        count: 4,
        all_enabled: true,
        observable: DataSetObservable::new(),
        views_built: Cell::new(0),
    });
    assert!(!adapter.is_enabled(1));

    // Wired while the children are created.
    let grid = StretchGrid::new();
    let clicks = record_clicks(&grid);
    grid.set_adapter(Some(adapter.clone()));
    assert!((0..4).all(|index| grid.click_child(index)));
    assert_eq!(
        *clicks.borrow(),
        vec![(0, 1000), (1, 1001), (2, 1002), (3, 1003)]
    );

    // Wired by a listener set afterwards.
    let grid = StretchGrid::new();
    grid.set_adapter(Some(adapter));
    let clicks = record_clicks(&grid);
    assert!((0..4).all(|index| grid.click_child(index)));
    assert_eq!(clicks.borrow().len(), 4);
}

#[test]
fn clearing_the_listener_silences_clicks() {
    let grid = StretchGrid::new();
    let clicks = record_clicks(&grid);
    grid.set_adapter(Some(labels(&["a"])));

    grid.set_on_item_click_listener(None);
    assert!(!grid.click_child(0));
    assert!(clicks.borrow().is_empty());
}

#[test]
fn children_without_an_adapter_are_not_clickable() {
    let grid = StretchGrid::new();
    grid.add_child(Rc::new(Label("plain".into())));
    let clicks = record_clicks(&grid);
    assert!(!grid.click_child(0));
    assert!(clicks.borrow().is_empty());
}

#[test]
fn listener_receives_the_clicked_view() {
    let grid = StretchGrid::new();
    grid.set_adapter(Some(labels(&["a", "b"])));
    let expected = grid.child_at(1).unwrap();

    let seen: Rc<RefCell<Option<(Rc<dyn View>, usize)>>> = Rc::default();
    let sink = seen.clone();
    grid.on_item_click(move |grid, view, position, _id| {
        assert_eq!(grid.child_count(), 2);
        *sink.borrow_mut() = Some((Rc::clone(view), position));
    });
    assert!(grid.click_child(1));

    let seen = seen.borrow();
    let (view, position) = seen.as_ref().unwrap();
    assert!(Rc::ptr_eq(view, &expected));
    assert_eq!(*position, 1);
}

#[test]
fn listener_may_reconfigure_the_grid() {
    let adapter = labels(&["a", "b"]);
    let grid = StretchGrid::new();
    grid.set_adapter(Some(adapter.clone()));
    grid.on_item_click(move |grid, _view, _position, _id| {
        grid.set_columns(1);
        grid.set_adapter(None);
    });

    assert!(grid.click_child(0));
    assert_eq!(grid.columns(), 1);
    assert_eq!(grid.child_count(), 0);
}

#[test]
fn perform_item_click_plays_feedback() {
    let cues = Rc::new(RefCell::new(Vec::<SoundEffect>::new()));
    let sink = cues.clone();
    let grid = StretchGrid::builder()
        .sound_effects(EventHandler::new(move |effect: SoundEffect| {
            sink.borrow_mut().push(effect)
        }))
        .build()
        .unwrap();
    let view: Rc<dyn View> = Rc::new(Label("x".into()));

    assert!(!grid.perform_item_click(&view, 3, 7));
    assert!(cues.borrow().is_empty());

    let clicks = record_clicks(&grid);
    assert!(grid.perform_item_click(&view, 3, 7));
    assert_eq!(*cues.borrow(), vec![SoundEffect::Click]);
    assert_eq!(*clicks.borrow(), vec![(3, 7)]);
}

#[test]
fn builder_wires_adapter_children() {
    let clicks = Rc::new(RefCell::new(Vec::new()));
    let sink = clicks.clone();
    let grid = StretchGrid::builder()
        .columns(2)
        .adapter(labels(&["a", "b", "c"]))
        .on_item_click(move |_grid, _view, position, id| sink.borrow_mut().push((position, id)))
        .build()
        .unwrap();

    assert_eq!(grid.child_count(), 3);
    assert!(grid.click_child(2));
    assert_eq!(*clicks.borrow(), vec![(2, 2)]);

    let size = grid
        .measure(MeasureSpec::Exactly(100), MeasureSpec::Unspecified)
        .unwrap();
    assert_eq!(size, Size::new(100, 32));
}
