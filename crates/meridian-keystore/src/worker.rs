//! Background offload for Argon2 derivation.
//!
//! Argon2 at production cost takes long enough to stall a UI thread, so
//! derivations run on a small pool of worker threads. Callers get a
//! [`PendingDerivation`] handle and block only when they actually need
//! the key.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;

use zeroize::Zeroizing;

use crate::kdf::{derive_key, KdfParams, DERIVED_KEY_LEN, SALT_LEN};
use crate::KeystoreError;

struct DeriveRequest {
    id: u64,
    password: Zeroizing<Vec<u8>>,
    salt: [u8; SALT_LEN],
    params: KdfParams,
    reply: mpsc::Sender<DeriveResponse>,
}

struct DeriveResponse {
    id: u64,
    result: Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, KeystoreError>,
}

/// A derivation in flight on the worker pool.
pub struct PendingDerivation {
    id: u64,
    rx: mpsc::Receiver<DeriveResponse>,
}

impl PendingDerivation {
    /// The request id, unique within the worker's lifetime.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Block until the derived key is ready.
    pub fn wait(self) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, KeystoreError> {
        let response = self
            .rx
            .recv()
            .map_err(|_| KeystoreError::WorkerUnavailable)?;
        debug_assert_eq!(response.id, self.id);
        response.result
    }
}

/// A fixed pool of threads running Argon2 derivations.
pub struct KdfWorker {
    tx: mpsc::Sender<DeriveRequest>,
    next_id: AtomicU64,
    params: KdfParams,
}

impl KdfWorker {
    /// Spawn a pool of `threads` workers using `params` for every
    /// derivation.
    pub fn new(threads: usize, params: KdfParams) -> Self {
        let (tx, rx) = mpsc::channel::<DeriveRequest>();
        let rx = Arc::new(Mutex::new(rx));

        for n in 0..threads.max(1) {
            let rx = Arc::clone(&rx);
            thread::Builder::new()
                .name(format!("kdf-worker-{}", n))
                .spawn(move || loop {
                    let request = {
                        let guard = match rx.lock() {
                            Ok(guard) => guard,
                            Err(_) => return,
                        };
                        guard.recv()
                    };
                    let request = match request {
                        Ok(request) => request,
                        // Channel closed, pool is shutting down.
                        Err(_) => return,
                    };
                    tracing::debug!(id = request.id, "starting key derivation");
                    let result = derive_key(&request.password, &request.salt, request.params);
                    tracing::debug!(
                        id = request.id,
                        ok = result.is_ok(),
                        "key derivation finished"
                    );
                    // The caller may have dropped its handle; that is fine.
                    let _ = request.reply.send(DeriveResponse {
                        id: request.id,
                        result,
                    });
                })
                .expect("spawn kdf worker thread");
        }

        Self {
            tx,
            next_id: AtomicU64::new(1),
            params,
        }
    }

    /// The cost parameters this pool derives with.
    pub fn params(&self) -> KdfParams {
        self.params
    }

    /// Queue a derivation and return a handle to its result.
    pub fn request(
        &self,
        password: &[u8],
        salt: [u8; SALT_LEN],
    ) -> Result<PendingDerivation, KeystoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (reply, rx) = mpsc::channel();
        self.tx
            .send(DeriveRequest {
                id,
                password: Zeroizing::new(password.to_vec()),
                salt,
                params: self.params,
                reply,
            })
            .map_err(|_| KeystoreError::WorkerUnavailable)?;
        Ok(PendingDerivation { id, rx })
    }

    /// Derive a key, blocking the caller.
    ///
    /// Runs on the pool when possible and falls back to deriving inline
    /// if the pool is gone.
    pub fn derive(
        &self,
        password: &[u8],
        salt: [u8; SALT_LEN],
    ) -> Result<Zeroizing<[u8; DERIVED_KEY_LEN]>, KeystoreError> {
        match self.request(password, salt) {
            Ok(pending) => pending.wait(),
            Err(KeystoreError::WorkerUnavailable) => {
                tracing::warn!("kdf worker pool unavailable, deriving inline");
                derive_key(password, &salt, self.params)
            }
            Err(e) => Err(e),
        }
    }
}
