/// List helpers: search and sorting for tables
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use std::cmp::Ordering;

/// Table rows that support text search
pub trait Searchable {
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Table rows that can be sorted by column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Sorts the list by field
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Filters the list; an empty filter keeps everything
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str) -> Vec<T> {
    let filter = filter.trim();
    if filter.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.matches_filter(filter))
        .cloned()
        .collect()
}

/// Case-insensitive substring match
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Header click handler: clicking the same column flips the direction
pub fn create_sort_toggle(
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl Fn(MouseEvent) + 'static {
    move |_| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|v| *v = !*v);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        nombre: &'static str,
        credito: f64,
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "credito" => self.credito.partial_cmp(&other.credito).unwrap_or(Ordering::Equal),
                _ => self.nombre.cmp(other.nombre),
            }
        }
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            contains_ci(self.nombre, filter)
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { nombre: "Electro Norte", credito: 5000.0 },
            Row { nombre: "Aparatos Sur", credito: 12000.0 },
            Row { nombre: "Clima Centro", credito: 800.0 },
        ]
    }

    #[test]
    fn test_sort_list_both_directions() {
        let mut items = rows();
        sort_list(&mut items, "nombre", true);
        assert_eq!(items[0].nombre, "Aparatos Sur");

        sort_list(&mut items, "credito", false);
        assert_eq!(items[0].credito, 12000.0);
        assert_eq!(items[2].credito, 800.0);
    }

    #[test]
    fn test_filter_list() {
        let items = rows();
        assert_eq!(filter_list(&items, "  ").len(), 3);
        let found = filter_list(&items, "NORTE");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].nombre, "Electro Norte");
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("nombre", "nombre", true), " ▲");
        assert_eq!(get_sort_indicator("nombre", "nombre", false), " ▼");
        assert_eq!(get_sort_indicator("credito", "nombre", true), " ⇅");
    }
}
