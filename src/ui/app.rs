use anyhow::Result;
use rust_decimal::Decimal;

use crate::analytics::{
    compare, forecast, income_alert, portfolio_curve, spending_tips, IncomeAlert, Insight,
    MonthlySummary, SpendingDelta, Tip, Trend,
};
use crate::config::Config;
use crate::models::Category;
use crate::session::Session;
use crate::voice::{HttpTranscriber, VoiceEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Expenses,
    Investments,
    Analytics,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Expenses,
            Self::Investments,
            Self::Analytics,
        ]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Expenses => write!(f, "Expenses"),
            Self::Investments => write!(f, "Investments"),
            Self::Analytics => write!(f, "Analytics"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    RecordVoice(VoiceEntry),
}

/// Amount `+`/`-` move the selected category by on the Expenses screen.
pub(crate) const ADJUST_STEP: i64 = 500;

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) config: Config,
    pub(crate) session: Session,
    pub(crate) transcriber: Option<HttpTranscriber>,

    // Dashboard
    pub(crate) summary: MonthlySummary,
    pub(crate) delta: Option<SpendingDelta>,
    pub(crate) alert: IncomeAlert,
    pub(crate) tips: Vec<Tip>,

    // Expenses
    pub(crate) category_index: usize,
    pub(crate) last_voice: Option<VoiceEntry>,

    // Investments
    pub(crate) portfolio_curve: Vec<f64>,

    // Analytics
    pub(crate) history: Vec<f64>,
    pub(crate) forecast: Vec<f64>,
    pub(crate) trend: Option<Trend>,
    pub(crate) insights: Vec<Insight>,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,
}

impl App {
    pub(crate) fn new(config: Config) -> Result<Self> {
        let transcriber = match config.transcription.endpoint.as_deref() {
            Some(endpoint) => {
                let transcriber = HttpTranscriber::new(
                    endpoint,
                    &config.transcription.language,
                    config.transcription.timeout(),
                )?;
                tracing::info!(endpoint = %transcriber.endpoint(), "voice input enabled");
                Some(transcriber)
            }
            None => None,
        };
        let session = Session::new(config.income);
        let summary = session.summary();

        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            config,
            session,
            transcriber,

            summary,
            delta: None,
            alert: IncomeAlert::WithinRange,
            tips: Vec::new(),

            category_index: 0,
            last_voice: None,

            portfolio_curve: Vec::new(),

            history: Vec::new(),
            forecast: Vec::new(),
            trend: None,
            insights: Vec::new(),

            pending_action: None,
            confirm_message: String::new(),
        };
        app.refresh_all();
        app.roll_delta();
        Ok(app)
    }

    pub(crate) fn refresh_dashboard(&mut self) {
        self.summary = self.session.summary();
        self.alert = income_alert(&self.summary);
        self.tips = spending_tips(self.session.ledger());
    }

    /// Compare against last month's total and remember this month's. Runs
    /// each time the dashboard is opened.
    pub(crate) fn roll_delta(&mut self) {
        self.delta = Some(self.session.roll_month_delta());
    }

    pub(crate) fn refresh_investments(&mut self) {
        self.portfolio_curve = portfolio_curve(self.session.portfolio());
    }

    pub(crate) fn refresh_analytics(&mut self) {
        self.insights = compare(self.session.ledger(), &self.config.benchmark);
        self.history = self.session.history().values().to_vec();
        self.trend = Trend::fit(&self.history);
        self.forecast = if self.history.is_empty() {
            Vec::new()
        } else {
            forecast(&self.history, self.config.forecast_horizon)
        };
    }

    /// The history is seeded from the spend entered so far on the first visit
    /// and stays fixed afterwards.
    pub(crate) fn open_analytics(&mut self) {
        self.session.ensure_history(self.config.history_months);
        self.refresh_analytics();
    }

    pub(crate) fn refresh_all(&mut self) {
        self.refresh_dashboard();
        self.refresh_investments();
        self.refresh_analytics();
    }

    pub(crate) fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
        match screen {
            Screen::Dashboard => {
                self.refresh_dashboard();
                self.roll_delta();
            }
            Screen::Expenses => self.refresh_dashboard(),
            Screen::Investments => self.refresh_investments(),
            Screen::Analytics => self.open_analytics(),
        }
    }

    /// Move to the next (`1`) or previous (`-1`) tab, wrapping around.
    pub(crate) fn cycle_screen(&mut self, step: isize) {
        let screens = Screen::all();
        let idx = screens.iter().position(|s| *s == self.screen).unwrap_or(0);
        let len = screens.len() as isize;
        let next = (idx as isize + step).rem_euclid(len) as usize;
        self.switch_screen(screens[next]);
    }

    pub(crate) fn move_selection(&mut self, down: bool) {
        let last = Category::all().len().saturating_sub(1);
        self.category_index = if down {
            (self.category_index + 1).min(last)
        } else {
            self.category_index.saturating_sub(1)
        };
    }

    pub(crate) fn selected_category(&self) -> Category {
        Category::all()
            .get(self.category_index)
            .copied()
            .unwrap_or(Category::Other)
    }

    /// Nudge the selected category by `steps * ADJUST_STEP`, never below zero.
    pub(crate) fn adjust_selected(&mut self, steps: i64) -> Result<()> {
        let category = self.selected_category();
        let current = self.session.ledger().get(category);
        let Some(next) = current.checked_add(Decimal::from(steps * ADJUST_STEP)) else {
            anyhow::bail!("Amount for {category} is too large");
        };
        let next = next.max(Decimal::ZERO);
        self.session.set_expense(category, next)?;
        self.refresh_all();
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
