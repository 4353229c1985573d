mod common;

use common::fixtures::tutorial_request;
use common::pdf_assertions::{page_contains, shown_text};
use common::{TestResult, generate};

#[test]
fn test_footers_skip_the_cover() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut request = tutorial_request();
    request.options.document.include_cover = true;
    request.options.document.running_title = Some("Release Handbook".to_string());
    let pdf = generate(&request)?;
    let total = pdf.page_count();

    assert!(!shown_text(&pdf.doc, 1).iter().any(|t| t.contains(" / ")));
    assert!(!page_contains(&pdf.doc, 1, "Release Handbook"));
    for n in 2..=total {
        let label = format!("{} / {}", n, total);
        assert!(page_contains(&pdf.doc, n as u32, &label), "page {} lacks '{}'", n, label);
        assert!(page_contains(&pdf.doc, n as u32, "Release Handbook"));
    }
    Ok(())
}

#[test]
fn test_footer_uses_parsed_title_by_default() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let pdf = generate(&tutorial_request())?;
    assert!(page_contains(&pdf.doc, 1, &format!("1 / {}", pdf.page_count())));
    // Contents page footer carries the document title.
    assert_eq!(
        shown_text(&pdf.doc, 1).iter().filter(|t| t.as_str() == "Deploy the App").count(),
        2
    );
    Ok(())
}

#[test]
fn test_metadata_and_language() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut request = tutorial_request();
    request.options.document.author = Some("Docs Team".to_string());
    request.options.document.language = Some("en-GB".to_string());
    request.options.document.keywords = vec!["release".to_string(), "deploy".to_string()];
    let pdf = generate(&request)?;

    let catalog = pdf.doc.catalog()?;
    assert_eq!(catalog.get(b"Lang")?.as_str()?, b"en-GB");
    assert_eq!(catalog.get(b"PageMode")?.as_name()?, b"UseOutlines");

    let info_id = pdf.doc.trailer.get(b"Info")?.as_reference()?;
    let info = pdf.doc.get_dictionary(info_id)?;
    assert_eq!(info.get(b"Title")?.as_str()?, b"Deploy the App");
    assert_eq!(info.get(b"Author")?.as_str()?, b"Docs Team");
    assert_eq!(info.get(b"Keywords")?.as_str()?, b"release, deploy");
    assert_eq!(info.get(b"CreationDate")?.as_str()?, b"D:20261017093000Z");
    Ok(())
}

#[test]
fn test_cover_shows_generation_date() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut request = tutorial_request();
    request.options.document.include_cover = true;
    request.options.document.author = Some("Docs Team".to_string());
    let pdf = generate(&request)?;

    assert!(page_contains(&pdf.doc, 1, "Docs Team"));
    assert!(page_contains(&pdf.doc, 1, "Generated October 17, 2026"));
    Ok(())
}
