use std::fmt::Display;

/// Joins the items of an iterator with a separator.
pub trait Join<Item: Display>: Iterator<Item = Item> {
    fn join(&mut self, sep: &str) -> String {
        let Some(first) = self.next() else {
            return String::new();
        };
        let (lb, _) = self.size_hint();
        let mut result = String::with_capacity(sep.len() * lb);
        result.push_str(&first.to_string());
        self.for_each(|i| {
            result.push_str(sep);
            result.push_str(&i.to_string());
        });
        result
    }
}

impl<T: ?Sized, Item: Display> Join<Item> for T where T: Iterator<Item = Item> {}
