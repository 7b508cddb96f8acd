use super::dto::{PublicUser, UserPage};
use super::repo::User;

fn field_of<'a>(user: &'a User, field: &str) -> Option<&'a str> {
    match field {
        "email" => Some(&user.email),
        "name" => Some(&user.name),
        _ => None,
    }
}

/// The `GET /users` pipeline: search, then sort, then paginate, then project.
///
/// `search` and `sort_by` are `field:value` / `field:direction` strings over
/// the fields `email` and `name`. Anything that does not parse as a known
/// field (or direction) is a permissive no-op, never an error. `page` is
/// 1-based; out-of-range pages yield an empty `data`.
///
/// The whole set is recomputed on every call. The dataset is assumed small;
/// no index or cache, a known scaling limit.
pub fn paginate_users(
    mut users: Vec<User>,
    page: usize,
    limit: usize,
    sort_by: Option<&str>,
    search: Option<&str>,
) -> UserPage {
    // Search: case-sensitive substring match on one field.
    if let Some((field, term)) = search.and_then(|s| s.split_once(':')) {
        if matches!(field, "email" | "name") {
            users.retain(|u| field_of(u, field).is_some_and(|v| v.contains(term)));
        }
    }

    // Sort: lexicographic, stable, only for a known field and direction.
    if let Some((field, direction)) = sort_by.and_then(|s| s.split_once(':')) {
        if matches!(field, "email" | "name") && matches!(direction, "asc" | "desc") {
            users.sort_by(|a, b| {
                let ord = field_of(a, field).cmp(&field_of(b, field));
                if direction == "desc" {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }
    }

    let total = users.len();
    let total_pages = total.div_ceil(limit);
    let start = (page - 1).saturating_mul(limit);

    // half-open slice [(page-1)*limit, page*limit)
    let data: Vec<PublicUser> = users
        .into_iter()
        .skip(start)
        .take(limit)
        .map(PublicUser::from)
        .collect();

    UserPage {
        page_number: page,
        page_size: limit,
        count: data.len(),
        total_pages,
        has_previous_page: page > 1,
        has_next_page: page < total_pages,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn user(name: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: "$argon2id$fake".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    /// 12 users, 4 of which contain "an" in their name.
    fn dataset() -> Vec<User> {
        [
            "Budi", "Ananda", "Citra", "Bintang", "Dewi", "Eko", "Hasan", "Fitri", "Gita",
            "Irfan", "Hesti", "Indra",
        ]
        .iter()
        .map(|n| user(n, &format!("{}@example.com", n.to_lowercase())))
        .collect()
    }

    #[test]
    fn search_sort_and_paginate_combined() {
        let page = paginate_users(dataset(), 2, 2, Some("name:asc"), Some("name:an"));

        // matches sorted asc: Ananda, Bintang, Hasan, Irfan; page 2 of 2
        let names: Vec<_> = page.data.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Hasan", "Irfan"]);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_size, 2);
        assert_eq!(page.count, 2);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn search_is_case_sensitive() {
        let users = vec![user("Anwar", "anwar@example.com"), user("randi", "r@e.co")];
        let page = paginate_users(users.clone(), 1, 10, None, Some("name:An"));
        assert_eq!(page.count, 1);
        assert_eq!(page.data[0].name, "Anwar");

        let page = paginate_users(users, 1, 10, None, Some("name:an"));
        assert_eq!(page.count, 1);
        assert_eq!(page.data[0].name, "randi");
    }

    #[test]
    fn unknown_search_field_keeps_everything() {
        let page = paginate_users(dataset(), 1, 20, None, Some("city:an"));
        assert_eq!(page.count, 12);
    }

    #[test]
    fn search_without_a_colon_keeps_everything() {
        let page = paginate_users(dataset(), 1, 20, None, Some("email"));
        assert_eq!(page.count, 12);
    }

    #[test]
    fn unknown_sort_field_or_direction_is_a_noop() {
        let original: Vec<_> = dataset().iter().map(|u| u.name.clone()).collect();

        let page = paginate_users(dataset(), 1, 20, Some("age:asc"), None);
        let names: Vec<_> = page.data.iter().map(|u| u.name.clone()).collect();
        assert_eq!(names, original);

        let page = paginate_users(dataset(), 1, 20, Some("name:upwards"), None);
        let names: Vec<_> = page.data.iter().map(|u| u.name.clone()).collect();
        assert_eq!(names, original);
    }

    #[test]
    fn sort_desc_reverses() {
        let page = paginate_users(dataset(), 1, 20, Some("email:desc"), None);
        let emails: Vec<_> = page.data.iter().map(|u| u.email.clone()).collect();
        let mut expected = emails.clone();
        expected.sort();
        expected.reverse();
        assert_eq!(emails, expected);
    }

    #[test]
    fn total_pages_is_the_ceiling() {
        let page = paginate_users(dataset(), 1, 5, None, None);
        assert_eq!(page.total_pages, 3); // ceil(12 / 5)
        assert!(page.has_next_page);
        assert!(!page.has_previous_page);
    }

    #[test]
    fn out_of_range_page_yields_empty_data() {
        let users: Vec<_> = dataset().into_iter().take(5).collect();
        let page = paginate_users(users, 99, 10, None, None);
        assert_eq!(page.count, 0);
        assert!(page.data.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[test]
    fn empty_filtered_set_has_zero_pages() {
        let page = paginate_users(dataset(), 1, 10, None, Some("name:zzz"));
        assert_eq!(page.count, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
    }

    #[test]
    fn pipeline_is_deterministic() {
        let users = dataset();
        let a = paginate_users(users.clone(), 2, 3, Some("name:desc"), Some("email:e"));
        let b = paginate_users(users, 2, 3, Some("name:desc"), Some("email:e"));
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }

    #[test]
    fn projection_never_contains_the_hash() {
        let page = paginate_users(dataset(), 1, 20, None, None);
        let json = serde_json::to_string(&page).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password"));
    }
}
