//! Контроллер подбора техники.
//!
//! Полное обновление (фасеты → согласование фильтров → первая страница)
//! запускается после паузы в изменениях фильтров; догрузка следующих страниц
//! идёт отдельно и не допускает двух запросов одновременно.
//!
//! Каждый цикл обновления и каждое изменение фильтра получает новый номер
//! поколения. Ответы, пришедшие для устаревшего поколения, отбрасываются и
//! состояние не трогают.

use super::api::{Clock, FleetBackend};
use super::config::FleetSelectorConfig;
use super::error::{normalize_error, ApiError};
use super::facets::{self, FacetOptions};
use super::filters::{FilterDimension, FleetFilters};
use super::paging::{PageCursor, Pager};
use super::search;
use contracts::projections::p909_fleet_selector::dto::FleetRow;
use std::cell::RefCell;
use std::rc::Rc;

pub const ERROR_TITLE: &str = "Error";
pub const FILTERS_RESET_TITLE: &str = "Filters reset";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Уведомление для пользователя (toast)
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::Info,
        }
    }
}

/// Снимок состояния для отрисовки
#[derive(Debug, Clone, PartialEq)]
pub struct FleetSnapshot {
    pub filters: FleetFilters,
    pub options: FacetOptions,
    pub rows: Rc<Vec<FleetRow>>,
    pub cursor: PageCursor,
    /// Поколение, к которому относятся строки
    pub generation: u64,
    /// Идёт полное обновление
    pub is_loading: bool,
    /// Идёт запрос страницы
    pub is_table_loading: bool,
}

impl FleetSnapshot {
    /// Состояние до первой загрузки
    pub fn empty(page_size: u32) -> Self {
        Self {
            filters: FleetFilters::default(),
            options: FacetOptions::default(),
            rows: Rc::default(),
            cursor: PageCursor::initial(page_size.max(1)),
            generation: 0,
            is_loading: false,
            is_table_loading: false,
        }
    }
}

/// Наблюдатель: UI-слой получает снимки и уведомления
pub trait FleetObserver {
    fn state_changed(&self, snapshot: &FleetSnapshot);
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed,
    Failed,
    /// Цикл вытеснен более новым обновлением
    Superseded,
    /// Вызов поглощён более поздним изменением фильтра
    Debounced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Appended(usize),
    Busy,
    Exhausted,
    Failed,
    Superseded,
}

enum PageStep {
    Applied(usize),
    Exhausted,
    Superseded,
}

struct SelectorState {
    filters: FleetFilters,
    options: FacetOptions,
    pager: Pager<FleetRow>,
    is_loading: bool,
    // поколение, которому принадлежит текущий запрос страницы
    page_in_flight: Option<u64>,
    generation: u64,
    debounce_ticket: u64,
    // изменение фильтра ждёт отложенного обновления
    refresh_queued: bool,
}

pub struct FleetSelector<B, C> {
    backend: B,
    clock: C,
    config: FleetSelectorConfig,
    observer: Rc<dyn FleetObserver>,
    state: RefCell<SelectorState>,
}

impl<B: FleetBackend, C: Clock> FleetSelector<B, C> {
    pub fn new(
        backend: B,
        clock: C,
        config: FleetSelectorConfig,
        observer: Rc<dyn FleetObserver>,
    ) -> Self {
        let config = config.validated();
        let state = SelectorState {
            filters: FleetFilters::default(),
            options: FacetOptions::default(),
            pager: Pager::new(config.page_size),
            is_loading: false,
            page_in_flight: None,
            generation: 0,
            debounce_ticket: 0,
            refresh_queued: false,
        };
        Self {
            backend,
            clock,
            config,
            observer,
            state: RefCell::new(state),
        }
    }

    /// Текущий выбор фильтров (копия)
    pub fn selection(&self) -> FleetFilters {
        self.state.borrow().filters.clone()
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        let st = self.state.borrow();
        FleetSnapshot {
            filters: st.filters.clone(),
            options: st.options.clone(),
            rows: st.pager.shared_rows(),
            cursor: st.pager.cursor(),
            generation: st.generation,
            is_loading: st.is_loading,
            is_table_loading: st.page_in_flight.is_some(),
        }
    }

    /// Сохраняет значение фильтра без проверки и без обновления
    pub fn set_filter(&self, dim: FilterDimension, value: impl Into<String>) {
        self.state.borrow_mut().filters.set(dim, value);
        self.emit();
    }

    /// Изменение фильтра пользователем: ответы, запрошенные для прежнего
    /// выбора, больше не применяются; обновление запускается с задержкой.
    pub async fn filter_changed(
        &self,
        dim: FilterDimension,
        value: impl Into<String>,
    ) -> RefreshOutcome {
        {
            let mut st = self.state.borrow_mut();
            st.filters.set(dim, value);
            st.generation += 1;
            st.page_in_flight = None;
        }
        self.emit();
        self.queue_refresh().await
    }

    /// Обновление с задержкой: выполняется только последний вызов из серии
    pub async fn queue_refresh(&self) -> RefreshOutcome {
        let ticket = {
            let mut st = self.state.borrow_mut();
            st.debounce_ticket += 1;
            st.refresh_queued = true;
            st.debounce_ticket
        };

        self.clock.sleep(self.config.debounce()).await;

        {
            let mut st = self.state.borrow_mut();
            if st.debounce_ticket != ticket {
                return RefreshOutcome::Debounced;
            }
            st.refresh_queued = false;
        }
        self.refresh().await
    }

    /// Полный цикл: сброс, фасеты, первая страница
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = {
            let mut st = self.state.borrow_mut();
            st.generation += 1;
            st.is_loading = true;
            st.page_in_flight = None;
            st.pager.reset();
            st.generation
        };
        log::debug!("Fleet refresh #{} started", generation);
        self.emit();

        let outcome = match self.run_cycle(generation).await {
            Ok(true) => RefreshOutcome::Completed,
            Ok(false) => {
                log::debug!("Fleet refresh #{} superseded", generation);
                RefreshOutcome::Superseded
            }
            Err(e) => {
                self.fail(&e);
                RefreshOutcome::Failed
            }
        };

        // Флаг загрузки снимает только актуальный цикл
        let is_current = {
            let mut st = self.state.borrow_mut();
            if st.generation == generation {
                st.is_loading = false;
                true
            } else {
                false
            }
        };
        if is_current {
            self.emit();
        }

        log::debug!("Fleet refresh #{} finished: {:?}", generation, outcome);
        outcome
    }

    /// Догрузка следующей страницы
    pub async fn load_more(&self) -> LoadOutcome {
        let generation = {
            let st = self.state.borrow();
            if st.page_in_flight.is_some() || st.is_loading || st.refresh_queued {
                log::debug!("Load more skipped: request in progress");
                return LoadOutcome::Busy;
            }
            if !st.pager.has_more() {
                return LoadOutcome::Exhausted;
            }
            st.generation
        };

        match self.load_page(generation).await {
            Ok(PageStep::Applied(appended)) => LoadOutcome::Appended(appended),
            Ok(PageStep::Exhausted) => LoadOutcome::Exhausted,
            Ok(PageStep::Superseded) => LoadOutcome::Superseded,
            Err(e) => {
                self.fail(&e);
                LoadOutcome::Failed
            }
        }
    }

    /// `Ok(false)` — цикл устарел, результат отброшен
    async fn run_cycle(&self, generation: u64) -> Result<bool, ApiError> {
        let selection = self.selection();
        let fetched = facets::fetch_facets(&self.backend, &selection).await;

        let cleared = {
            let mut st = self.state.borrow_mut();
            if st.generation != generation {
                return Ok(false);
            }
            let options = fetched?;
            let cleared = facets::reconcile(&mut st.filters, &options);
            st.options = options;
            cleared
        };
        self.emit();

        if !cleared.is_empty() {
            log::debug!("Filters reset after facet refresh: {:?}", cleared);
            let labels: Vec<&str> = cleared.iter().map(|dim| dim.label()).collect();
            self.observer
                .notify(Notification::info(FILTERS_RESET_TITLE, labels.join(", ")));
        }

        match self.load_page(generation).await? {
            PageStep::Superseded => Ok(false),
            PageStep::Applied(_) | PageStep::Exhausted => Ok(true),
        }
    }

    async fn load_page(&self, generation: u64) -> Result<PageStep, ApiError> {
        let (selection, page) = {
            let mut st = self.state.borrow_mut();
            if st.generation != generation {
                return Ok(PageStep::Superseded);
            }
            let Some(page) = st.pager.next_page() else {
                return Ok(PageStep::Exhausted);
            };
            st.page_in_flight = Some(generation);
            (st.filters.clone(), page)
        };
        self.emit();

        let fetched = search::fetch_page(&self.backend, &selection, page).await;

        let step = {
            let mut st = self.state.borrow_mut();
            if st.generation != generation {
                log::debug!(
                    "Dropping page {} of stale refresh #{}",
                    page.page_number,
                    generation
                );
                return Ok(PageStep::Superseded);
            }
            st.page_in_flight = None;
            match fetched {
                Ok(batch) => Ok(PageStep::Applied(
                    st.pager.apply_page(batch.records, batch.total),
                )),
                Err(e) => Err(e),
            }
        };
        self.emit();
        step
    }

    fn fail(&self, error: &ApiError) {
        let message = normalize_error(error);
        log::warn!("Fleet selector request failed: {}", message);
        self.observer.notify(Notification::error(message));
    }

    fn emit(&self) {
        let snapshot = self.snapshot();
        self.observer.state_changed(&snapshot);
    }
}
