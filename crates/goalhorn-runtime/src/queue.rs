//! The command queue and its single consumer.
//!
//! Producers (monitors, the completion watcher, the health endpoint) call
//! [`CommandQueue::enqueue`] from any task. Exactly one task drains the
//! queue through [`CommandQueue::run`], so commands with side effects never
//! run concurrently.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::{Notify, RwLock};
use tracing::{debug, info};

use crate::command::{Command, CommandContext, Flow, Priority};
use crate::error::{Result, RuntimeError};

struct QueueInner {
    items: Mutex<VecDeque<Command>>,
    notify: Notify,
    running: AtomicBool,
}

/// Thread-safe command queue handle. Clones share the same queue.
///
/// # Ordering
///
/// A command is inserted immediately before the first queued item that is
/// [`Priority::Normal`] while the new command is not; otherwise it is
/// appended. Normal commands therefore stay FIFO, and a high-priority
/// command cuts ahead of the first normal one without passing high-priority
/// commands already in front of it. The queue is never re-sorted.
#[derive(Clone)]
pub struct CommandQueue {
    inner: Arc<QueueInner>,
}

impl CommandQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(QueueInner {
                items: Mutex::new(VecDeque::new()),
                notify: Notify::new(),
                running: AtomicBool::new(false),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, VecDeque<Command>>> {
        self.inner
            .items
            .lock()
            .map_err(|e| RuntimeError::LockPoisoned(e.to_string()))
    }

    /// Inserts a command according to the cut-ahead rule.
    pub fn enqueue(&self, command: Command) -> Result<()> {
        let name = command.name();
        {
            let mut items = self.lock()?;
            let priority = command.priority();
            let position = items
                .iter()
                .position(|x| x.priority() == Priority::Normal && priority != Priority::Normal);
            match position {
                Some(index) => items.insert(index, command),
                None => items.push_back(command),
            }
            debug!(command = %name, queued = items.len(), "Command enqueued");
        }
        self.inner.notify.notify_one();
        Ok(())
    }

    /// Removes and returns the front command.
    pub fn dequeue(&self) -> Result<Option<Command>> {
        Ok(self.lock()?.pop_front())
    }

    /// Enqueues a [`Command::Shutdown`] at normal priority.
    pub fn stop(&self) -> Result<()> {
        self.enqueue(Command::Shutdown)
    }

    /// Removes every queued command. Returns how many were dropped.
    pub fn clear(&self) -> Result<usize> {
        let mut items = self.lock()?;
        let dropped = items.len();
        items.clear();
        Ok(dropped)
    }

    /// Names of the queued commands, front first.
    pub fn names(&self) -> Result<Vec<&'static str>> {
        Ok(self.lock()?.iter().map(Command::name).collect())
    }

    /// Number of queued commands.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns true if nothing is queued.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Returns true while a consumer is inside [`run`](Self::run).
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// Runs the consumer loop until a [`Command::Shutdown`] executes.
    ///
    /// Waits when the queue is empty and wakes on the next enqueue. On
    /// shutdown every command still queued is dropped and the queue is left
    /// empty. Only one consumer may run at a time.
    pub async fn run(&self, ctx: &CommandContext) -> Result<()> {
        if self.inner.running.swap(true, Ordering::SeqCst) {
            return Err(RuntimeError::AlreadyRunning);
        }
        info!("Command queue started");

        let result = self.drain(ctx).await;

        self.inner.running.store(false, Ordering::SeqCst);
        info!("Command queue stopped");
        result
    }

    async fn drain(&self, ctx: &CommandContext) -> Result<()> {
        loop {
            let Some(command) = self.dequeue()? else {
                self.inner.notify.notified().await;
                continue;
            };

            debug!(command = %command, "Executing command");
            if command.execute(ctx).await == Flow::Shutdown {
                let dropped = self.clear()?;
                info!(dropped, "Shutdown received, queue cleared");
                return Ok(());
            }
        }
    }
}

impl Default for CommandQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The queue of the cycle currently running, if any.
///
/// The day session sets it for the lifetime of each cycle; the health
/// endpoint reads it to enqueue probes.
#[derive(Clone, Default)]
pub struct ActiveQueue {
    slot: Arc<RwLock<Option<CommandQueue>>>,
}

impl ActiveQueue {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the running queue.
    pub async fn set(&self, queue: CommandQueue) {
        *self.slot.write().await = Some(queue);
    }

    /// Clears the slot.
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }

    /// Returns a handle to the running queue.
    pub async fn get(&self) -> Option<CommandQueue> {
        self.slot.read().await.clone()
    }
}
