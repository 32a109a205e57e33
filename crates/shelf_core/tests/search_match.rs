use shelf_core::{matches, Book, SearchField};

#[test]
fn field_parse_accepts_exact_lowercase_names_only() {
    assert_eq!(SearchField::parse("title"), Some(SearchField::Title));
    assert_eq!(SearchField::parse("author"), Some(SearchField::Author));
    assert_eq!(SearchField::parse("year"), Some(SearchField::Year));
    assert_eq!(SearchField::parse("Title"), None);
    assert_eq!(SearchField::parse(" Author "), None);
    assert_eq!(SearchField::parse("YEAR"), None);
    assert_eq!(SearchField::parse("status"), None);
    assert_eq!(SearchField::parse("id"), None);
}

#[test]
fn title_match_ignores_case() {
    let book = Book::new(1, "War and Peace", "Tolstoy", 1869);
    assert!(matches(&book, SearchField::Title, "WAR"));
    assert!(matches(&book, SearchField::Title, "and pea"));
    assert!(!matches(&book, SearchField::Title, "tolstoy"));
}

#[test]
fn year_match_is_substring_of_rendered_digits() {
    let nineteen_84 = Book::new(1, "1984", "Orwell", 1984);
    let nineteen_99 = Book::new(2, "x", "y", 1999);
    let two_thousand = Book::new(3, "x", "y", 2000);

    assert!(matches(&nineteen_84, SearchField::Year, "9"));
    assert!(matches(&nineteen_99, SearchField::Year, "9"));
    assert!(!matches(&two_thousand, SearchField::Year, "9"));
}

#[test]
fn non_ascii_match_ignores_case() {
    let book = Book::new(1, "Мастер и Маргарита", "Булгаков", 1967);
    assert!(matches(&book, SearchField::Title, "МАРГАРИТА"));
    assert!(matches(&book, SearchField::Author, "булг"));
}

#[test]
fn empty_needle_matches_everything() {
    let book = Book::new(1, "Dune", "Herbert", 1965);
    for field in SearchField::ALL {
        assert!(matches(&book, field, ""));
    }
}
