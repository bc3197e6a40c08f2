//! Single-writer actor.
//!
//! All mutating operations funnel through one background task owning one
//! connection, so writes are serialized process-wide and each job runs inside
//! its own `immediate_transaction`. This is what makes the snapshot
//! delete+insert swap atomic: a job either commits whole or rolls back whole,
//! and two recomputes of the same account can never interleave.

use super::DbPool;
use crate::errors::StorageError;
use diesel::SqliteConnection;
use ledgerworth_core::errors::Result;
use std::any::Any;
use tokio::sync::{mpsc, oneshot};

type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer's dedicated connection, inside
    /// one transaction. Returns the job's result once it has committed or
    /// rolled back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                reply_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        reply_rx
            .await
            .expect("writer actor dropped the reply sender without answering")
            .map(|boxed| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor returned an unexpected type"))
            })
    }
}

/// Spawns the background writer task. The actor holds a single connection
/// from the pool for its whole lifetime and processes jobs strictly in
/// arrival order.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to check out the writer actor's connection");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The receiver may have given up waiting; that's its problem.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
