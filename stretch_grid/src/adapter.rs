use super::*;
use std::cell::RefCell;
use std::rc::Weak;
use tracing::{debug, trace};

/// Notified when the data behind an [`Adapter`] changes.
pub trait DataSetObserver {
    /// The data changed; views should be rebuilt from the adapter.
    fn on_changed(&self);

    /// The data is no longer valid.
    fn on_invalidated(&self);
}

/// An ordered data source that produces one view per item.
pub trait Adapter {
    fn count(&self) -> usize;

    fn view(&self, position: usize) -> Rc<dyn View>;

    /// Row id of the item at `position`.
    fn item_id(&self, position: usize) -> i64 {
        position as i64
    }

    fn is_enabled(&self, _position: usize) -> bool {
        true
    }

    fn are_all_items_enabled(&self) -> bool {
        true
    }

    /// Installs `observer`. An adapter has a single observer slot; registering
    /// replaces whatever was there.
    fn register_observer(&self, observer: Weak<dyn DataSetObserver>);

    /// Clears the slot if it holds `observer`.
    fn unregister_observer(&self, observer: &Weak<dyn DataSetObserver>);
}

/// Single-slot observer registry for adapter implementations.
#[derive(Default)]
pub struct DataSetObservable {
    observer: RefCell<Option<Weak<dyn DataSetObserver>>>,
}

impl DataSetObservable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, observer: Weak<dyn DataSetObserver>) {
        let previous = self.observer.replace(Some(observer));
        if previous.is_some() {
            debug!("replacing registered data set observer");
        }
    }

    pub fn unregister(&self, observer: &Weak<dyn DataSetObserver>) {
        let mut slot = self.observer.borrow_mut();
        if slot.as_ref().is_some_and(|current| current.ptr_eq(observer)) {
            *slot = None;
        }
    }

    pub fn has_observer(&self) -> bool {
        self.current().is_some()
    }

    pub fn notify_changed(&self) {
        if let Some(observer) = self.current() {
            trace!("data set changed");
            observer.on_changed();
        }
    }

    pub fn notify_invalidated(&self) {
        if let Some(observer) = self.current() {
            trace!("data set invalidated");
            observer.on_invalidated();
        }
    }

    // The observer runs without the slot borrowed so it may unregister itself.
    fn current(&self) -> Option<Rc<dyn DataSetObserver>> {
        self.observer.borrow().as_ref().and_then(Weak::upgrade)
    }
}

impl core::fmt::Debug for DataSetObservable {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        fmt.debug_struct("DataSetObservable")
            .field("has_observer", &self.has_observer())
            .finish()
    }
}

/// An adapter over a vector of items, with a factory that turns each item into
/// a view.
///
/// The factory runs without the items borrowed, so it may change the adapter.
pub struct ArrayAdapter<T> {
    items: RefCell<Vec<Rc<T>>>,
    factory: Box<dyn Fn(usize, &T) -> Rc<dyn View>>,
    observable: DataSetObservable,
}

impl<T> ArrayAdapter<T> {
    pub fn new<F>(items: Vec<T>, factory: F) -> Rc<Self>
    where
        F: Fn(usize, &T) -> Rc<dyn View> + 'static,
    {
        Rc::new(Self {
            items: RefCell::new(items.into_iter().map(Rc::new).collect()),
            factory: Box::new(factory),
            observable: DataSetObservable::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn get(&self, position: usize) -> Option<T>
    where
        T: Clone,
    {
        self.items
            .borrow()
            .get(position)
            .map(|item| T::clone(item))
    }

    /// Replaces every item and notifies the observer.
    pub fn set_items(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items.into_iter().map(Rc::new).collect();
        self.observable.notify_changed();
    }

    pub fn push(&self, item: T) {
        self.items.borrow_mut().push(Rc::new(item));
        self.observable.notify_changed();
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
        self.observable.notify_changed();
    }

    pub fn notify_data_set_changed(&self) {
        self.observable.notify_changed();
    }

    pub fn notify_data_set_invalidated(&self) {
        self.observable.notify_invalidated();
    }
}

impl<T> Adapter for ArrayAdapter<T> {
    fn count(&self) -> usize {
        self.len()
    }

    fn view(&self, position: usize) -> Rc<dyn View> {
        let item = Rc::clone(&self.items.borrow()[position]);
        (self.factory)(position, &item)
    }

    fn register_observer(&self, observer: Weak<dyn DataSetObserver>) {
        self.observable.register(observer);
    }

    fn unregister_observer(&self, observer: &Weak<dyn DataSetObserver>) {
        self.observable.unregister(observer);
    }
}
