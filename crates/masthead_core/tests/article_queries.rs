use masthead_core::{
    Article, Author, ConnectionProvider, Magazine, RepoError, SqliteProvider,
};
use tempfile::TempDir;

struct Catalog {
    _dir: TempDir,
    db: SqliteProvider,
    jane: Author,
    john: Author,
    tech: Magazine,
    design: Magazine,
}

fn open_catalog() -> Catalog {
    let dir = tempfile::tempdir().unwrap();
    let db = SqliteProvider::open(dir.path().join("catalog.db")).unwrap();

    let mut jane = Author::new("Jane Doe").unwrap();
    jane.save(&db).unwrap();
    let mut john = Author::new("John Smith").unwrap();
    john.save(&db).unwrap();
    let mut tech = Magazine::new("Tech Today", "Technology").unwrap();
    tech.save(&db).unwrap();
    let mut design = Magazine::new("Design Weekly", "Design").unwrap();
    design.save(&db).unwrap();

    Catalog {
        _dir: dir,
        db,
        jane,
        john,
        tech,
        design,
    }
}

#[test]
fn save_inserts_then_updates() {
    let catalog = open_catalog();
    let db = &catalog.db;

    let mut article = Article::new(
        "Intro to Systems",
        catalog.jane.id().unwrap(),
        catalog.tech.id().unwrap(),
    )
    .unwrap();
    let id = article.save(db).unwrap().id().unwrap();

    article.set_title("Intro to Operating Systems").unwrap();
    article.magazine_id = catalog.design.id().unwrap();
    article.save(db).unwrap();

    let loaded = Article::find_by_id(db, id).unwrap().unwrap();
    assert_eq!(loaded.title(), "Intro to Operating Systems");
    assert_eq!(Some(loaded.magazine_id), catalog.design.id());
    assert_eq!(loaded.id(), Some(id));
}

#[test]
fn find_by_id_returns_none_when_absent() {
    let catalog = open_catalog();
    assert!(Article::find_by_id(&catalog.db, 1).unwrap().is_none());
}

#[test]
fn find_by_title_returns_every_match() {
    let catalog = open_catalog();
    let db = &catalog.db;
    let first = catalog
        .jane
        .add_article(db, &catalog.tech, "Weekly Roundup")
        .unwrap();
    let second = catalog
        .john
        .add_article(db, &catalog.design, "Weekly Roundup")
        .unwrap();
    catalog
        .john
        .add_article(db, &catalog.design, "Something Else")
        .unwrap();

    let found = Article::find_by_title(db, "Weekly Roundup").unwrap();
    assert_eq!(found, [first, second]);
    assert!(Article::find_by_title(db, "Missing Title").unwrap().is_empty());
}

#[test]
fn find_by_author_and_magazine_filter_by_foreign_key() {
    let catalog = open_catalog();
    let db = &catalog.db;
    let jane_tech = catalog
        .jane
        .add_article(db, &catalog.tech, "Intro to Systems")
        .unwrap();
    let john_tech = catalog
        .john
        .add_article(db, &catalog.tech, "Rust for Beginners")
        .unwrap();
    let john_design = catalog
        .john
        .add_article(db, &catalog.design, "Typography Matters")
        .unwrap();

    let by_john = Article::find_by_author(db, catalog.john.id().unwrap()).unwrap();
    assert_eq!(by_john, [john_tech.clone(), john_design]);

    let in_tech = Article::find_by_magazine(db, catalog.tech.id().unwrap()).unwrap();
    assert_eq!(in_tech, [jane_tech, john_tech]);
}

#[test]
fn author_and_magazine_resolve_foreign_keys() {
    let catalog = open_catalog();
    let db = &catalog.db;
    let article = catalog
        .jane
        .add_article(db, &catalog.design, "Color Theory Today")
        .unwrap();

    assert_eq!(article.author(db).unwrap(), Some(catalog.jane.clone()));
    assert_eq!(article.magazine(db).unwrap(), Some(catalog.design.clone()));
}

#[test]
fn orphaned_foreign_keys_resolve_to_none() {
    let catalog = open_catalog();
    let db = &catalog.db;
    let article = catalog
        .jane
        .add_article(db, &catalog.tech, "Intro to Systems")
        .unwrap();

    let conn = db.get_connection().unwrap();
    conn.execute_batch(
        "PRAGMA foreign_keys = OFF;
         DELETE FROM authors;
         DELETE FROM magazines;",
    )
    .unwrap();
    drop(conn);

    assert!(article.author(db).unwrap().is_none());
    assert!(article.magazine(db).unwrap().is_none());
}

#[test]
fn stored_row_violating_title_contract_is_reported() {
    let catalog = open_catalog();
    let db = &catalog.db;
    let article = catalog
        .jane
        .add_article(db, &catalog.tech, "Intro to Systems")
        .unwrap();

    let conn = db.get_connection().unwrap();
    conn.execute(
        "UPDATE articles SET title = 'abc' WHERE id = ?1;",
        [article.id().unwrap()],
    )
    .unwrap();
    drop(conn);

    let err = Article::find_by_id(db, article.id().unwrap()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
