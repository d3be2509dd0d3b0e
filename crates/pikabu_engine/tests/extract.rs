use pikabu_engine::{
    extract_post_fields, first_anchor_href, matching_excluded_tag, parse_document,
    story_block_links, CompiledSelectors, PostFields, SelectorSet,
};
use pretty_assertions::assert_eq;

fn selectors(excluded: &[&str]) -> CompiledSelectors {
    let excluded: Vec<String> = excluded.iter().map(|s| s.to_string()).collect();
    CompiledSelectors::compile(&SelectorSet::default(), &excluded).unwrap()
}

const POST_PAGE: &str = r#"
<html><body>
  <header><a href="/story/x#comments">12 comments</a></header>
  <article class="story">
    <h1><a class="story__title-link" href="//pikabu.ru/story/x">Exa<b>mple</b></a></h1>
    <time class="story__datetime" datetime="2024-01-01T00:00:00">1 Jan</time>
    <div class="story__tags">
      <a class="tags__tag" href="/tag/news">news</a>
      <a class="tags__tag" href="/tag/funny">funny</a>
    </div>
  </article>
  <aside><a class="tags__tag">not a post tag</a></aside>
</body></html>
"#;

#[test]
fn post_fields_are_read_from_first_matches() {
    let doc = parse_document(POST_PAGE.as_bytes()).unwrap();
    let fields = extract_post_fields(&doc, &selectors(&[]));
    assert_eq!(
        fields,
        PostFields {
            date: "2024-01-01T00:00:00".into(),
            title: "Example".into(),
            tags: vec!["news".into(), "funny".into()],
            title_href: "//pikabu.ru/story/x".into(),
        }
    );
}

#[test]
fn missing_fields_are_empty_not_errors() {
    let doc = parse_document(b"<html><body><p>nothing here</p></body></html>").unwrap();
    let fields = extract_post_fields(&doc, &selectors(&[]));
    assert_eq!(fields, PostFields::default());
}

#[test]
fn datetime_without_attribute_is_ignored() {
    let html = r#"<time class="story__datetime">yesterday</time>
                  <time class="story__datetime" datetime="2024-02-02T10:00:00">today</time>"#;
    let doc = parse_document(html.as_bytes()).unwrap();
    let fields = extract_post_fields(&doc, &selectors(&[]));
    assert_eq!(fields.date, "2024-02-02T10:00:00");
}

#[test]
fn story_blocks_yield_title_hrefs_in_document_order() {
    let html = r#"
    <div class="story"><a class="story__title-link" href="//pikabu.ru/story/a">A</a></div>
    <div class="ad"><a class="story__title-link" href="//pikabu.ru/ad">Ad</a></div>
    <div class="story"><span>no link</span></div>
    <div class="story">
        <a class="story__title-link" href="//pikabu.ru/story/c">C</a>
        <a class="story__title-link" href="//pikabu.ru/story/c2">C2</a>
    </div>
    "#;
    let doc = parse_document(html.as_bytes()).unwrap();
    assert_eq!(
        story_block_links(&doc, &selectors(&[])),
        vec![
            "//pikabu.ru/story/a".to_string(),
            String::new(),
            "//pikabu.ru/story/c".to_string(),
        ]
    );
}

#[test]
fn listing_without_blocks_is_empty() {
    let doc = parse_document(b"<html><body><div class=\"feed\"></div></body></html>").unwrap();
    assert!(story_block_links(&doc, &selectors(&[])).is_empty());
}

#[test]
fn excluded_tag_reports_first_matching_selector() {
    let doc = parse_document(POST_PAGE.as_bytes()).unwrap();
    let sel = selectors(&["a[href='/tag/politics']", "a[href='/tag/funny']", "article"]);
    assert_eq!(matching_excluded_tag(&doc, &sel), Some("a[href='/tag/funny']"));
    assert_eq!(matching_excluded_tag(&doc, &selectors(&[".banned"])), None);
}

#[test]
fn first_anchor_is_the_identifier() {
    let doc = parse_document(POST_PAGE.as_bytes()).unwrap();
    assert_eq!(first_anchor_href(&doc, &selectors(&[])), "/story/x#comments");

    let doc = parse_document(b"<a name=\"top\"></a><a href=\"/later\">x</a>").unwrap();
    assert_eq!(first_anchor_href(&doc, &selectors(&[])), "");
}

#[test]
fn invalid_utf8_is_a_parse_error() {
    let err = parse_document(b"<p>caf\xe9</p>").unwrap_err();
    assert_eq!(err.valid_up_to, 6);
}
