use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tdas_models::{ConversationEntry, Table};
use tracing::debug;
use uuid::Uuid;

use crate::report::{column_total, distinct_values, summarize};

/// State owned by one interactive session.
///
/// Holds both optional tables, the derived data context and the full
/// conversation transcript. The context is rebuilt synchronously every
/// time a table is installed, so it is never stale. Nothing here is
/// persisted; the hosting shell creates one `Session` per user session
/// and drops it at the end.
pub struct Session {
    id: Uuid,
    created_at: DateTime<Utc>,
    trades: Option<Table>,
    holdings: Option<Table>,
    context: String,
    history: Vec<ConversationEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            trades: None,
            holdings: None,
            context: String::new(),
            history: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn trades(&self) -> Option<&Table> {
        self.trades.as_ref()
    }

    pub fn holdings(&self) -> Option<&Table> {
        self.holdings.as_ref()
    }

    /// Install a trades table and rebuild the data context.
    pub fn set_trades(&mut self, table: Table) {
        self.trades = Some(table);
        self.rebuild_context();
    }

    /// Install a holdings table and rebuild the data context.
    pub fn set_holdings(&mut self, table: Table) {
        self.holdings = Some(table);
        self.rebuild_context();
    }

    fn rebuild_context(&mut self) {
        self.context = summarize(self.trades.as_ref(), self.holdings.as_ref());
        debug!(chars = self.context.len(), "Rebuilt data context");
    }

    /// The cached report fed into the chat prompt. Empty until the first
    /// table is installed.
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn has_data(&self) -> bool {
        self.trades.is_some() || self.holdings.is_some()
    }

    pub fn history(&self) -> &[ConversationEntry] {
        &self.history
    }

    /// Record a completed question/answer exchange. Append-only.
    pub fn record_exchange(&mut self, question: impl Into<String>, reply: impl Into<String>) {
        self.history.push(ConversationEntry::user(question));
        self.history.push(ConversationEntry::assistant(reply));
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Headline numbers for the shell's status display.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            trade_rows: self.trades.as_ref().map_or(0, Table::len),
            holding_rows: self.holdings.as_ref().map_or(0, Table::len),
            unique_funds: self
                .holdings
                .as_ref()
                .map_or(0, |t| distinct_values(t, "ShortName").len()),
            total_pl_ytd: self
                .holdings
                .as_ref()
                .and_then(|t| column_total(t, "PL_YTD")),
            exchanges: self.history.len() / 2,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Headline metrics rendered by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub trade_rows: usize,
    pub holding_rows: usize,
    pub unique_funds: usize,
    /// Sum over numeric PL_YTD cells; `None` when the column is absent.
    pub total_pl_ytd: Option<Decimal>,
    /// Completed question/answer pairs in the transcript.
    pub exchanges: usize,
}
