use masthead_core::{
    Author, Magazine, MagazineArticleCount, SqliteProvider, CONTRIBUTING_AUTHOR_MIN_ARTICLES,
};
use tempfile::TempDir;

fn open_catalog() -> (TempDir, SqliteProvider) {
    let dir = tempfile::tempdir().unwrap();
    let db = SqliteProvider::open(dir.path().join("catalog.db")).unwrap();
    (dir, db)
}

fn saved_author(db: &SqliteProvider, name: &str) -> Author {
    let mut author = Author::new(name).unwrap();
    author.save(db).unwrap();
    author
}

fn saved_magazine(db: &SqliteProvider, name: &str, category: &str) -> Magazine {
    let mut magazine = Magazine::new(name, category).unwrap();
    magazine.save(db).unwrap();
    magazine
}

fn write_articles(db: &SqliteProvider, author: &Author, magazine: &Magazine, count: usize) {
    for index in 0..count {
        author
            .add_article(db, magazine, format!("{} piece {index}", author.name()))
            .unwrap();
    }
}

#[test]
fn save_sets_id_and_updates_in_place() {
    let (_dir, db) = open_catalog();
    let mut magazine = Magazine::new("Tech Today", "Technology").unwrap();
    magazine.save(&db).unwrap();
    let id = magazine.id().unwrap();

    magazine.set_category("Computing").unwrap();
    magazine.save(&db).unwrap();

    let loaded = Magazine::find_by_id(&db, id).unwrap().unwrap();
    assert_eq!(loaded.category(), "Computing");
    assert_eq!(Magazine::all(&db).unwrap().len(), 1);
}

#[test]
fn find_by_name_and_category_return_collections() {
    let (_dir, db) = open_catalog();
    let tech = saved_magazine(&db, "Tech Today", "Technology");
    let tech_eu = saved_magazine(&db, "Tech Today", "Technology");
    let design = saved_magazine(&db, "Design Weekly", "Design");

    assert_eq!(
        Magazine::find_by_name(&db, "Tech Today").unwrap(),
        [tech.clone(), tech_eu.clone()]
    );
    assert_eq!(
        Magazine::find_by_category(&db, "Design").unwrap(),
        [design]
    );
    assert!(Magazine::find_by_category(&db, "Sports").unwrap().is_empty());
    assert!(Magazine::find_by_id(&db, 99).unwrap().is_none());
}

#[test]
fn contributors_are_distinct_authors() {
    let (_dir, db) = open_catalog();
    let jane = saved_author(&db, "Jane Doe");
    let john = saved_author(&db, "John Smith");
    saved_author(&db, "Amara Okafor");
    let tech = saved_magazine(&db, "Tech Today", "Technology");

    write_articles(&db, &jane, &tech, 2);
    write_articles(&db, &john, &tech, 1);

    assert_eq!(tech.contributors(&db).unwrap(), [jane, john]);
}

#[test]
fn article_titles_follow_articles_order() {
    let (_dir, db) = open_catalog();
    let jane = saved_author(&db, "Jane Doe");
    let tech = saved_magazine(&db, "Tech Today", "Technology");
    jane.add_article(&db, &tech, "Intro to Systems").unwrap();
    jane.add_article(&db, &tech, "Scaling SQLite").unwrap();

    assert_eq!(
        tech.article_titles(&db).unwrap(),
        ["Intro to Systems", "Scaling SQLite"]
    );
    assert_eq!(tech.articles(&db).unwrap().len(), 2);
}

#[test]
fn contributing_authors_need_more_than_two_articles() {
    let (_dir, db) = open_catalog();
    let prolific = saved_author(&db, "Jane Doe");
    let occasional = saved_author(&db, "John Smith");
    let tech = saved_magazine(&db, "Tech Today", "Technology");
    let design = saved_magazine(&db, "Design Weekly", "Design");

    let min_articles = CONTRIBUTING_AUTHOR_MIN_ARTICLES as usize;
    assert_eq!(min_articles, 3);
    write_articles(&db, &prolific, &tech, min_articles);
    write_articles(&db, &occasional, &tech, min_articles - 1);
    // Articles elsewhere do not count toward this magazine.
    write_articles(&db, &occasional, &design, 5);

    assert_eq!(tech.contributing_authors(&db).unwrap(), [prolific]);
    assert_eq!(design.contributing_authors(&db).unwrap(), [occasional]);
}

#[test]
fn with_multiple_authors_requires_two_distinct_writers() {
    let (_dir, db) = open_catalog();
    let jane = saved_author(&db, "Jane Doe");
    let john = saved_author(&db, "John Smith");
    let tech = saved_magazine(&db, "Tech Today", "Technology");
    let design = saved_magazine(&db, "Design Weekly", "Design");
    saved_magazine(&db, "Empty Quarterly", "Misc");

    write_articles(&db, &jane, &tech, 1);
    write_articles(&db, &john, &tech, 1);
    write_articles(&db, &jane, &design, 3);

    assert_eq!(Magazine::with_multiple_authors(&db).unwrap(), [tech]);
}

#[test]
fn top_publisher_ranks_by_article_count_with_lowest_id_tie_break() {
    let (_dir, db) = open_catalog();
    assert!(Magazine::top_publisher(&db).unwrap().is_none());

    let jane = saved_author(&db, "Jane Doe");
    let tech = saved_magazine(&db, "Tech Today", "Technology");
    let design = saved_magazine(&db, "Design Weekly", "Design");
    assert_eq!(Magazine::top_publisher(&db).unwrap(), Some(tech.clone()));

    write_articles(&db, &jane, &design, 2);
    assert_eq!(Magazine::top_publisher(&db).unwrap(), Some(design.clone()));

    write_articles(&db, &jane, &tech, 2);
    assert_eq!(Magazine::top_publisher(&db).unwrap(), Some(tech));
}

#[test]
fn article_counts_include_magazines_without_articles() {
    let (_dir, db) = open_catalog();
    let jane = saved_author(&db, "Jane Doe");
    let tech = saved_magazine(&db, "Tech Today", "Technology");
    let empty = saved_magazine(&db, "Empty Quarterly", "Misc");
    write_articles(&db, &jane, &tech, 3);

    let counts = Magazine::article_counts(&db).unwrap();
    assert_eq!(
        counts,
        [
            MagazineArticleCount {
                id: tech.id().unwrap(),
                name: "Tech Today".to_string(),
                category: "Technology".to_string(),
                article_count: 3,
            },
            MagazineArticleCount {
                id: empty.id().unwrap(),
                name: "Empty Quarterly".to_string(),
                category: "Misc".to_string(),
                article_count: 0,
            },
        ]
    );

    let json = serde_json::to_value(&counts[1]).unwrap();
    assert_eq!(json["article_count"], 0);
}

#[test]
fn unsaved_magazine_has_no_relations() {
    let (_dir, db) = open_catalog();
    let draft = Magazine::new("Draft Weekly", "Drafts").unwrap();

    assert!(draft.articles(&db).unwrap().is_empty());
    assert!(draft.contributors(&db).unwrap().is_empty());
    assert!(draft.contributing_authors(&db).unwrap().is_empty());
    assert!(draft.article_titles(&db).unwrap().is_empty());
}
