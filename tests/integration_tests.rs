use glob::glob;
use rex_shallow::errors::{Error, MarkupError, WellformednessError};
use rex_shallow::*;
use std::fs;
use std::path::PathBuf;

struct Fixture {
    name: String,
    input: String,
}

fn fixtures(kind: &str) -> Vec<Fixture> {
    let pattern = format!("{}/tests/fixtures/{kind}/*.xml", env!("CARGO_MANIFEST_DIR"));

    let fixtures = glob(&pattern)
        .unwrap()
        .map(|path| {
            let path: PathBuf = path.unwrap();

            Fixture {
                name: path.file_name().unwrap().to_string_lossy().to_string(),
                input: fs::read_to_string(&path).unwrap(),
            }
        })
        .collect::<Vec<_>>();

    assert!(!fixtures.is_empty(), "no fixtures found for {pattern}");

    fixtures
}

fn fixture(kind: &str, name: &str) -> Fixture {
    fixtures(kind)
        .into_iter()
        .find(|f| f.name == name)
        .unwrap_or_else(|| panic!("missing fixture {kind}/{name}"))
}

#[test]
fn round_trip() {
    for kind in ["wellformed", "malformed"] {
        for Fixture { name, input } in fixtures(kind) {
            assert_eq!(concat_tokens(tokenize(&input)).unwrap(), input, "{name}");
            assert_eq!(shallow_parse(&input).concat(), input, "{name}");
        }
    }
}

#[test]
fn wellformed_documents_pass_the_check() {
    for Fixture { name, input } in fixtures("wellformed") {
        let output = concat_tokens(
            wellformedness_check(tokenize(&input)).require_closed_elements(true),
        );

        assert_eq!(output.as_deref(), Ok(input.as_str()), "{name}");
    }
}

#[test]
fn wellformed_documents_have_no_error_tokens() {
    for Fixture { name, input } in fixtures("wellformed") {
        for token in tokenize(&input) {
            assert!(!token.unwrap().is_a(TokenKinds::ERRORS), "{name}");
        }
    }
}

#[test]
fn malformed_documents_fail_the_check() {
    for Fixture { name, input } in fixtures("malformed") {
        assert!(
            wellformedness_check(tokenize(&input)).any(|t| t.is_err()),
            "{name}"
        );
    }
}

#[test]
fn unterminated_attribute_value() {
    let Fixture { input, .. } = fixture("malformed", "unterminated_attribute.xml");
    let mut diagnostics = Vec::new();

    let errors = tokenize(&input)
        .with_error_sink(|d| diagnostics.push(d.clone()))
        .filter_map(|t| match t.unwrap() {
            Token::Error(error) => Some(error),
            _ => None,
        })
        .collect::<Vec<_>>();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].raw(), r#"<item id="2>second"#);
    assert_eq!(&input[errors[0].span().range()], errors[0].raw());
    assert_eq!(diagnostics, vec![errors[0].diagnostic(&input)]);

    assert_eq!(
        concat_tokens(wellformedness_check(tokenize(&input))),
        Err(Error::Markup(MarkupError {
            markup: r#"<item id="2>second</item>"#.into()
        }))
    );
}

#[test]
fn mismatched_tags() {
    let Fixture { input, .. } = fixture("malformed", "mismatched_tags.xml");

    assert_eq!(
        concat_tokens(wellformedness_check(tokenize(&input))),
        Err(Error::Wellformedness(WellformednessError::MismatchedEndTag {
            start: "<b>".into(),
            end: "</a>".into()
        }))
    );
}

#[test]
fn contexts() {
    let Fixture { input, .. } = fixture("wellformed", "prefixed.xml");

    assert_eq!(
        find_all_contexts(tokenize(&input)).unwrap(),
        vec!["x:body", "x:body/x:h1", "x:body/x:p", "x:body/x:img"]
    );

    let Fixture { input, .. } = fixture("wellformed", "catalog.xml");

    assert_eq!(
        find_all_contexts(tokenize(&input)).unwrap(),
        vec![
            "catalog",
            "catalog/book",
            "catalog/book/dc:title",
            "catalog/book/dc:creator",
            "catalog/book/price",
            "catalog/book/cover",
            "catalog/book/description",
        ]
    );
}

#[test]
fn expanded_documents_stay_wellformed() {
    for Fixture { name, input } in fixtures("wellformed") {
        let expanded = concat_tokens(expand_empty_tags(tokenize(&input), &[])).unwrap();

        assert!(!tokenize(&expanded).any(|t| t.unwrap().is_a(TokenKinds::EMPTY_TAGS)), "{name}");
        assert!(
            wellformedness_check(tokenize(&expanded)).all(|t| t.is_ok()),
            "{name}"
        );
        assert_eq!(
            find_all_contexts(tokenize(&expanded)),
            find_all_contexts(tokenize(&input)),
            "{name}"
        );
    }
}

#[test]
fn document_metadata() {
    let Fixture { input, .. } = fixture("wellformed", "xhtml.xml");
    let mut tokenizer = tokenize(&input);

    for token in tokenizer.by_ref() {
        if let Token::Doctype(doctype) = token.unwrap() {
            assert_eq!(doctype.id_type(), DoctypeIdType::Public);
            assert_eq!(doctype.id_value(), "-//W3C//DTD XHTML 1.0 Strict//EN");
            assert_eq!(
                doctype.system_id(),
                "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd"
            );
        }
    }

    let metadata = tokenizer.metadata();

    assert_eq!(metadata.version.as_deref(), Some("1.0"));
    assert_eq!(metadata.encoding_label.as_deref(), Some("ISO-8859-1"));
    assert_eq!(metadata.encoding_or_default(), encoding_rs::WINDOWS_1252);

    let Fixture { input, .. } = fixture("wellformed", "prefixed.xml");
    let mut tokenizer = tokenize(&input);

    tokenizer.by_ref().for_each(drop);

    assert_eq!(tokenizer.metadata(), &DocumentMetadata::default());
}

#[test]
fn rewriting_a_document() {
    let Fixture { input, .. } = fixture("wellformed", "catalog.xml");

    let rewritten = tokenize(&input).map(|token| {
        let mut token = token?;

        match &mut token {
            Token::XmlDeclaration(declaration) => {
                declaration.remove_pseudo_attribute("standalone");
                declaration.set_pseudo_attribute("encoding", "us-ascii").unwrap();
            }
            Token::ProcessingInstruction(pi) if pi.target() == "xml-stylesheet" => {
                pi.set_pseudo_attribute("href", "other.xsl").unwrap();
            }
            Token::StartTag(tag) if tag.local_name() == "title" => {
                tag.set_ns_prefix("").unwrap();
                tag.set_attribute("lang", "en").unwrap();
            }
            Token::EndTag(tag) if tag.local_name() == "title" => tag.set_ns_prefix("").unwrap(),
            Token::Comment(comment) => comment.set_content(" removed ").unwrap(),
            Token::Cdata(cdata) => token = cdata.to_text_token().into(),
            _ => (),
        }

        Ok::<_, Error>(token)
    });

    let output = concat_tokens(rewritten).unwrap();

    assert!(output.starts_with(concat!(
        r#"<?xml version="1.0" encoding="us-ascii"?>"#,
        "\n",
        r#"<?xml-stylesheet type="text/xsl" href="other.xsl"?>"#
    )));
    assert!(output.contains(r#"<title lang="en">Midnight Rain</title>"#));
    assert!(output.contains("<!-- removed -->"));
    assert!(output.contains("with &lt;XML>. Square brackets"));
    assert!(!output.contains("CDATA"));
    assert!(wellformedness_check(tokenize(&output)).all(|t| t.is_ok()));
}
