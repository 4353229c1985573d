use crate::flow::PageSink;
use shotdoc_types::PageHandle;

/// A page sink that only counts the pages it hands out.
#[derive(Debug, Default)]
pub struct CountingSink {
    pub pages: Vec<PageHandle>,
}

impl PageSink for CountingSink {
    fn start_page(&mut self) -> PageHandle {
        let handle = PageHandle::new(self.pages.len() as u32 + 1);
        self.pages.push(handle);
        handle
    }
}
