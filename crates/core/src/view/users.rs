//! User-management table state
//!
//! [`derive_user_list`] turns cached rows plus the page's search, filter and
//! sort state into the list the table renders. It is a pure function: same
//! inputs, same output.

use std::cmp::Ordering;

use theradmin_domain::{User, UserRole, UserRow, UserStatus};

/// A filter dimension: `All` accepts everything, `Only` is strict equality.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Filter<T> {
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Name,
    #[default]
    LastLogin,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Local state of the user-management page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserListState {
    pub search: String,
    pub role: Filter<UserRole>,
    pub status: Filter<UserStatus>,
    pub location: Filter<String>,
    pub sort_by: SortKey,
    pub sort_dir: SortDirection,
}

impl UserListState {
    /// Case-insensitive substring match on name, email or id. An empty query
    /// matches everything.
    pub fn matches_search(&self, row: &UserRow) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&row.name, &row.email, &row.id].iter().any(|field| field.to_lowercase().contains(&needle))
    }

    /// All active filters, combined with AND.
    pub fn accepts(&self, row: &UserRow) -> bool {
        self.matches_search(row)
            && self.role.accepts(&row.role)
            && self.status.accepts(&row.status)
            && self.location.accepts(&row.location)
    }

    fn compare(&self, a: &UserRow, b: &UserRow) -> Ordering {
        let ordering = match self.sort_by {
            SortKey::Name => compare_text(&a.name, &b.name),
            SortKey::LastLogin => compare_text(&a.last_login, &b.last_login),
            SortKey::Status => compare_text(a.status.as_str(), b.status.as_str()),
        };
        self.sort_dir.apply(ordering)
    }
}

/// Case-insensitive first, then by code point so the order is total.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Filter and sort `rows` for display.
///
/// The sort is stable, so rows that compare equal keep the order of `rows`.
pub fn derive_user_list(rows: &[UserRow], state: &UserListState) -> Vec<UserRow> {
    let mut list: Vec<UserRow> = rows.iter().filter(|row| state.accepts(row)).cloned().collect();
    list.sort_by(|a, b| state.compare(a, b));
    list
}

/// Pick the collection the table is built from.
///
/// A non-empty search with the role filter on Therapist or Patient uses that
/// role's search results; an empty search uses the full patient list.
/// Anything else yields no rows.
pub fn select_user_source(
    state: &UserListState,
    therapist_results: Option<&[User]>,
    patient_results: Option<&[User]>,
    all_patients: Option<&[User]>,
) -> Vec<UserRow> {
    let (users, role) = if state.search.is_empty() {
        (all_patients, UserRole::Patient)
    } else {
        match state.role {
            Filter::Only(UserRole::Therapist) => (therapist_results, UserRole::Therapist),
            Filter::Only(UserRole::Patient) => (patient_results, UserRole::Patient),
            _ => (None, UserRole::Patient),
        }
    };
    users.unwrap_or_default().iter().map(|user| UserRow::from_user(user, role)).collect()
}
