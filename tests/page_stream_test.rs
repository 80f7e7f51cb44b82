use std::fs::File;
use std::io::{BufWriter, Write};

use tempfile::TempDir;

use wikiraider::page::{EXPORT_NAMESPACE, PageRecord, PageStreamReader};

const PAGE_COUNT: usize = 10_000;

#[test]
fn test_large_export_is_streamed_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("large-pages-articles.xml");

    let mut out = BufWriter::new(File::create(&path).unwrap());
    writeln!(out, r#"<mediawiki xmlns="{EXPORT_NAMESPACE}" version="0.10">"#).unwrap();
    for i in 0..PAGE_COUNT {
        // Every hundredth page is a redirect stub without text.
        let text = if i % 100 == 99 {
            String::new()
        } else {
            format!("Page number {i} links to [[Page_{}]].", i + 1)
        };
        writeln!(
            out,
            "<page><title>Page_{i}</title><ns>0</ns><id>{i}</id><revision><id>{i}</id><text>{text}</text></revision></page>"
        )
        .unwrap();
    }
    writeln!(out, "</mediawiki>").unwrap();
    out.flush().unwrap();
    drop(out);

    let mut reader = PageStreamReader::open(&path).unwrap();
    let mut expected = 0;
    let mut last: Option<PageRecord> = None;
    for record in reader.by_ref() {
        let record = record.unwrap();
        if expected % 100 == 99 {
            expected += 1;
        }
        assert_eq!(record.title, format!("Page_{expected}"));
        expected += 1;
        last = Some(record);
    }

    assert_eq!(reader.pages_seen(), PAGE_COUNT as u64);
    assert_eq!(reader.pages_dropped(), (PAGE_COUNT / 100) as u64);
    assert_eq!(
        last,
        Some(PageRecord::new(
            "Page_9998",
            "Page number 9998 links to [[Page_9999]]."
        ))
    );
}
