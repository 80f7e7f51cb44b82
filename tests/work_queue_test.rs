use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use wikiraider::analysis::tokenizer::WordTokenizer;
use wikiraider::page::PageRecord;
use wikiraider::error::Result;
use wikiraider::queue::{ItemProcessor, PageConsumer, QueueConfig, WordSet, WorkQueue};

fn pages(count: usize) -> Vec<PageRecord> {
    (0..count)
        .map(|i| PageRecord::new(format!("Title{}", letters(i)), format!("body {} text", letters(i))))
        .collect()
}

/// Encode a number as letters so it survives tokenization.
fn letters(mut n: usize) -> String {
    let mut word = String::new();
    loop {
        word.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            return word;
        }
    }
}

#[test]
fn test_drain_completes_for_any_pool_size() {
    for consumers in [1, 2, 5, 16] {
        for count in [0, 1, 7, 1_000] {
            let words = WordSet::new();
            let consumer = Arc::new(PageConsumer::new(
                Arc::new(WordTokenizer::default()),
                words.clone(),
            ));
            let config = QueueConfig::new(consumers).with_idle_timeout(Duration::from_millis(10));
            let queue = WorkQueue::start(config, consumer).unwrap();

            for page in pages(count) {
                queue.enqueue(page).unwrap();
            }
            queue.signal_draining().unwrap();
            queue.await_drain().unwrap();

            assert!(queue.is_finished());
            assert_eq!(queue.pending(), 0);
            assert_eq!(queue.stats().processed, count as u64);
            // Two unique words per page plus the shared "body" and "text".
            let expected = if count == 0 { 0 } else { 2 * count + 2 };
            assert_eq!(words.len(), expected, "{consumers} consumers, {count} pages");
        }
    }
}

#[test]
fn test_panicking_pages_do_not_stop_the_drain() {
    struct Picky {
        inner: PageConsumer,
        panics: AtomicUsize,
    }

    impl ItemProcessor<PageRecord> for Picky {
        fn process(&self, page: PageRecord) -> Result<()> {
            if page.title.ends_with('x') {
                self.panics.fetch_add(1, Ordering::SeqCst);
                panic!("cannot handle {}", page.title);
            }
            self.inner.process(page)
        }
    }

    let words = WordSet::new();
    let picky = Arc::new(Picky {
        inner: PageConsumer::with_default_tokenizer(words.clone()),
        panics: AtomicUsize::new(0),
    });
    let queue = WorkQueue::start(QueueConfig::new(3), Arc::clone(&picky)).unwrap();

    queue.enqueue(PageRecord::new("Dog", "The dog runs.")).unwrap();
    queue.enqueue(PageRecord::new("Fox", "Quick brown fox")).unwrap();
    queue.enqueue(PageRecord::new("Cat", "Cats sleep.")).unwrap();
    queue.signal_draining().unwrap();
    queue.await_drain().unwrap();

    assert_eq!(picky.panics.load(Ordering::SeqCst), 1);
    assert_eq!(queue.stats().failed, 1);
    assert_eq!(
        words.to_sorted_vec(),
        vec!["Cat", "Cats", "Dog", "The", "dog", "runs", "sleep"]
    );
}
