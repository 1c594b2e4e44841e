use std::fs;
use std::path::Path;

use quire_collections::{
    CollectionRegistry, EntryError, LoadError, Loader, PassthroughImageResolver, SchemaKind,
    default_site_registry,
};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = dir.path();

    write(
        root,
        "src/content/blog/hello-world.md",
        "---\ntitle: Hello World\ndescription: First post\npublishDate: 01/19/2026\ntags: [Rust, rust, Astro]\nheroImage:\n  src: ./cover.png\n  alt: Cover\n---\n# Hello\n",
    );
    write(root, "src/content/blog/cover.png", "not really a png");
    write(
        root,
        "src/content/blog/2025/Year In Review.mdx",
        "---\ntitle: Year in review\ndescription: Looking back\npublishDate: 2025/12/31\n---\nBody\n",
    );
    write(
        root,
        "src/content/blog/wip.md",
        "---\ntitle: Work in progress\ndescription: Not yet\npublishDate: 2026-02-01\ndraft: true\n---\n",
    );
    write(root, "src/content/blog/notes.txt", "ignored");

    write(
        root,
        "src/content/docs/index.md",
        "---\ntitle: Overview\ndescription: Start here\norder: 1\n---\n",
    );
    write(
        root,
        "src/content/docs/guides/index.md",
        "---\ntitle: Guides\ndescription: How-tos\n---\n",
    );
    write(
        root,
        "src/content/docs/guides/setup.md",
        "+++\ntitle = \"Setup\"\ndescription = \"Install things\"\norder = 2\nslug = \"/install/\"\n+++\n",
    );

    dir
}

#[test]
fn loads_blog_collection() {
    let dir = site();
    let registry = default_site_registry();
    let loader = Loader::new(dir.path(), &registry);

    let blog = loader.load("blog").expect("blog loads");
    assert_eq!(blog.schema(), SchemaKind::Blog);
    assert_eq!(blog.len(), 3);

    let ids: Vec<&str> = blog.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["2025/year-in-review", "hello-world", "wip"]);

    let hello = blog.get("hello-world").unwrap();
    let data = hello.data.as_blog().unwrap();
    assert_eq!(data.tags, vec!["rust", "astro"]);
    assert_eq!(data.publish_date.date_naive().to_string(), "2026-01-19");
    assert_eq!(hello.body, "# Hello\n");
    let image = data.hero_image.as_ref().unwrap();
    assert_eq!(
        image.path.as_deref(),
        Some(dir.path().join("src/content/blog/cover.png").as_path())
    );

    let listed: Vec<&str> = blog.sorted().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(listed, vec!["hello-world", "2025/year-in-review"]);
}

#[test]
fn loads_docs_with_index_and_slug_ids() {
    let dir = site();
    let registry = default_site_registry();
    let docs = Loader::new(dir.path(), &registry).load("docs").unwrap();

    let mut ids: Vec<&str> = docs.entries().iter().map(|e| e.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["guides", "index", "install"]);

    let guides = docs.get("guides").unwrap().data.as_docs().unwrap();
    assert_eq!(guides.order, 999.0);

    let listed: Vec<&str> = docs.sorted().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(listed, vec!["index", "install", "guides"]);
}

#[test]
fn reports_every_broken_file() {
    let dir = site();
    write(
        dir.path(),
        "src/content/blog/broken.md",
        "---\ndescription: No title here\npublishDate: someday\n---\n",
    );
    write(
        dir.path(),
        "src/content/blog/missing-image.md",
        "---\ntitle: Missing image\ndescription: d\npublishDate: 2026-01-01\nheroImage:\n  src: ./nope.png\n---\n",
    );
    write(dir.path(), "src/content/blog/unterminated.md", "---\ntitle: x\n");

    let registry = default_site_registry();
    let err = Loader::new(dir.path(), &registry).load("blog").unwrap_err();
    let LoadError::Entries { collection, failures } = err else {
        panic!("expected entry failures");
    };
    assert_eq!(collection, "blog");
    assert_eq!(failures.len(), 3);

    let names: Vec<String> = failures
        .iter()
        .map(|f| f.path().file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["broken.md", "missing-image.md", "unterminated.md"]);

    let broken = failures[0].validation().unwrap();
    assert!(broken.has_field("title"));
    assert!(broken.has_field("publishDate"));
    assert!(failures[1].validation().unwrap().has_field("heroImage"));
    assert!(matches!(failures[2], EntryError::Frontmatter { .. }));
}

#[test]
fn duplicate_ids_are_rejected() {
    let dir = site();
    write(
        dir.path(),
        "src/content/docs/setup-again.md",
        "---\ntitle: Setup again\ndescription: d\nslug: install\n---\n",
    );

    let registry = default_site_registry();
    let err = Loader::new(dir.path(), &registry).load("docs").unwrap_err();
    let LoadError::Entries { failures, .. } = err else {
        panic!("expected entry failures");
    };
    assert_eq!(failures.len(), 1);
    assert!(matches!(&failures[0], EntryError::DuplicateId { id, .. } if id == "install"));
}

#[test]
fn loads_every_registered_collection() {
    let dir = site();
    let registry = default_site_registry();
    let collections = Loader::new(dir.path(), &registry).load_all().unwrap();

    let summary: Vec<(&str, SchemaKind, usize)> = collections
        .iter()
        .map(|c| (c.name(), c.schema(), c.len()))
        .collect();
    assert_eq!(
        summary,
        vec![("blog", SchemaKind::Blog, 3), ("docs", SchemaKind::Docs, 3)]
    );
}

#[test]
fn load_all_stops_at_the_first_broken_collection() {
    let dir = site();
    write(dir.path(), "src/content/blog/broken.md", "---\ntitle: x\n---\n");
    let registry = default_site_registry();
    let err = Loader::new(dir.path(), &registry).load_all().unwrap_err();
    assert!(matches!(err, LoadError::Entries { collection, .. } if collection == "blog"));
}

#[test]
fn unknown_collection_is_an_error() {
    let registry = default_site_registry();
    let err = Loader::new("/nonexistent", &registry).load("notes").unwrap_err();
    assert!(matches!(err, LoadError::UnknownCollection(name) if name == "notes"));
}

#[test]
fn missing_base_directory_yields_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let registry = default_site_registry();
    let blog = Loader::new(dir.path(), &registry).load("blog").unwrap();
    assert!(blog.is_empty());
}

#[test]
fn custom_registry_and_resolver() {
    let dir = site();
    let registry = CollectionRegistry::from_json(
        r#"{"collections": {"posts": {"loader": {"base": "src/content/blog", "pattern": "*.md"}, "schema": "blog"}}}"#,
    )
    .unwrap();
    write(
        dir.path(),
        "src/content/blog/hello-world.md",
        "---\ntitle: Hello\ndescription: d\npublishDate: 2026-01-19\nheroImage:\n  src: https://example.com/a.png\n---\n",
    );

    let loader = Loader::new(dir.path(), &registry).with_image_resolver(PassthroughImageResolver);
    let posts = loader.load("posts").unwrap();
    let ids: Vec<&str> = posts.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["hello-world", "wip"]);
}

#[test]
fn load_error_display_names_files_and_fields() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "src/content/docs/bad.md",
        "---\ntitle: 42\ndescription: d\n---\n",
    );
    let registry = default_site_registry();
    let err = Loader::new(dir.path(), &registry).load("docs").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.starts_with("collection `docs` has 1 invalid entry"));
    assert!(rendered.contains("bad.md"));
    assert!(rendered.contains("  - title: Expected string, received number"));
}
