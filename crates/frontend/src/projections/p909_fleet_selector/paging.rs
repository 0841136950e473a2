use std::rc::Rc;

/// Курсор постраничной загрузки (page_number начинается с 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub page_size: u32,
    pub page_number: u32,
    pub loaded_count: usize,
    pub total_count: usize,
    pub has_more: bool,
}

impl PageCursor {
    pub fn initial(page_size: u32) -> Self {
        Self {
            page_size,
            page_number: 1,
            loaded_count: 0,
            total_count: 0,
            has_more: true,
        }
    }
}

/// Параметры следующего запроса страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_size: u32,
    pub page_number: u32,
}

/// Накопленные строки + курсор.
///
/// Строки только дописываются в конец; полностью очищаются через `reset()`.
/// После исчерпания (`has_more == false`) новые страницы не запрашиваются
/// до следующего `reset()`.
///
/// Строки хранятся в `Rc`, чтобы снимки состояния не копировали их.
#[derive(Debug, Clone)]
pub struct Pager<R> {
    cursor: PageCursor,
    rows: Rc<Vec<R>>,
}

impl<R> Pager<R> {
    pub fn new(page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            cursor: PageCursor::initial(page_size),
            rows: Rc::new(Vec::new()),
        }
    }

    pub fn reset(&mut self) {
        self.rows = Rc::new(Vec::new());
        self.cursor = PageCursor::initial(self.cursor.page_size);
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn shared_rows(&self) -> Rc<Vec<R>> {
        Rc::clone(&self.rows)
    }

    pub fn has_more(&self) -> bool {
        self.cursor.has_more
    }

    pub fn next_page(&self) -> Option<PageRequest> {
        if !self.cursor.has_more {
            return None;
        }
        Some(PageRequest {
            page_size: self.cursor.page_size,
            page_number: self.cursor.page_number,
        })
    }

    /// Применяет загруженную страницу, возвращает число добавленных строк.
    ///
    /// Пустая страница завершает загрузку, даже если сервер сообщил
    /// `total` больше уже загруженного.
    pub fn apply_page(&mut self, batch: Vec<R>, total: usize) -> usize
    where
        R: Clone,
    {
        let appended = batch.len();
        Rc::make_mut(&mut self.rows).extend(batch);

        self.cursor.total_count = total;
        self.cursor.loaded_count = self.rows.len();

        if self.cursor.loaded_count >= self.cursor.total_count || appended == 0 {
            self.cursor.has_more = false;
        } else {
            self.cursor.page_number = self.cursor.page_number.saturating_add(1);
        }

        appended
    }
}
