//! Local list state
//!
//! After a create, update or delete, screens splice the server's answer
//! into the list they already fetched instead of re-fetching the whole
//! collection.

use crate::api::{Food, Meal};
use crate::auth::User;

/// Records addressable by their server-assigned id.
pub trait Keyed {
    fn key(&self) -> i64;
}

impl Keyed for Food {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for Meal {
    fn key(&self) -> i64 {
        self.id
    }
}

impl Keyed for User {
    fn key(&self) -> i64 {
        self.id
    }
}

/// Replace the record with the same id, or append when it is new.
pub fn upsert<T: Keyed>(items: &mut Vec<T>, item: T) {
    match items.iter_mut().find(|existing| existing.key() == item.key()) {
        Some(slot) => *slot = item,
        None => items.push(item),
    }
}

/// Remove exactly the record with the given id. Returns whether it was
/// present; everything else is left untouched.
pub fn remove<T: Keyed>(items: &mut Vec<T>, key: i64) -> bool {
    let before = items.len();
    items.retain(|item| item.key() != key);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: i64, name: &str, calories: i64) -> Food {
        Food {
            id,
            name: name.to_string(),
            calories,
        }
    }

    #[test]
    fn test_upsert_appends_new_record() {
        let mut foods = vec![food(1, "Apple", 52)];
        upsert(&mut foods, food(2, "Banana", 89));

        assert_eq!(foods.len(), 2);
        assert_eq!(foods[1].name, "Banana");
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut foods = vec![food(1, "Apple", 52), food(2, "Banana", 89)];
        upsert(&mut foods, food(1, "Green apple", 48));

        assert_eq!(foods.len(), 2);
        assert_eq!(foods[0].name, "Green apple");
        assert_eq!(foods[0].calories, 48);
        assert_eq!(foods[1].name, "Banana");
    }

    #[test]
    fn test_remove_takes_exactly_one() {
        let mut foods = vec![food(5, "Rice", 130), food(7, "Egg", 155), food(9, "Oats", 389)];

        assert!(remove(&mut foods, 7));
        assert_eq!(foods.iter().map(|f| f.id).collect::<Vec<_>>(), vec![5, 9]);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let mut foods = vec![food(1, "Apple", 52)];

        assert!(!remove(&mut foods, 99));
        assert_eq!(foods.len(), 1);
    }
}
