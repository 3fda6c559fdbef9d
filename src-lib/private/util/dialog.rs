// This file is part of simple-color-picker and is licenced under the GNU GPL v3.0.
// See LICENSE file for full text.
// Copyright © 2023 Michael Ripley

//! Native popup dialogs, shown from a dedicated worker thread.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;

use debug_print::debug_eprintln;
use lazy_static::lazy_static;
use native_dialog::{MessageDialog, MessageType};

const DIALOG_TITLE: &str = "Simple Color Picker";

lazy_static! {
    // this is some arcane nonsense to get a global mpsc
    // the sender can be cloned, and we'll do that via a thread_local later
    // the receiver can't be cloned, so just shove it in an Option so we can take() it later.
    static ref DIALOG_REQUEST_CHANNEL: (Mutex<mpsc::Sender<DialogRequest>>, Mutex<Option<mpsc::Receiver<DialogRequest>>>) = {
        let (sender, receiver) = mpsc::channel();
        let sender = Mutex::new(sender);
        let receiver = Mutex::new(Some(receiver));
        (sender, receiver)
    };
}

thread_local! {
    // We only need one of these per thread. As we don't use any thread pools this should be a one-time cost on application startup.
    static DIALOG_REQUEST_SENDER: Option<mpsc::Sender<DialogRequest>> = DIALOG_REQUEST_CHANNEL.0.lock().ok().map(|sender| sender.clone());
}

/// The different types of requests the dialog worker thread can process
enum DialogRequest {
    /// Show an info popup with the provided text
    Info(String),
    /// Show a warning popup with the provided text
    Warning(String),
    /// Stop the dialog worker thread
    Terminate,
}

impl DialogRequest {
    /// what to show for this request, or `None` if the worker should stop
    fn into_dialog(self) -> Option<(MessageType, String)> {
        match self {
            DialogRequest::Info(text) => Some((MessageType::Info, text)),
            DialogRequest::Warning(text) => Some((MessageType::Warning, text)),
            DialogRequest::Terminate => None,
        }
    }
}

pub struct DialogWorker {
    join_handle: Option<JoinHandle<()>>,
}

impl DialogWorker {
    /// signal the dialog worker thread to shut down once it's done processing its queue
    pub fn shutdown(&mut self) -> Option<()> {
        send(DialogRequest::Terminate);
        self.join_handle.take()?.join().ok()
    }
}

fn send(request: DialogRequest) {
    DIALOG_REQUEST_SENDER.with(|sender| {
        if let Some(sender) = sender {
            let _ = sender.send(request);
        }
    });
}

/// show a native popup with an info icon + sound
pub fn show_info(text: String) {
    send(DialogRequest::Info(text));
}

/// show a native popup with a warning icon + sound
pub fn show_warning(text: String) {
    debug_eprintln!("warning: {}", text);
    send(DialogRequest::Warning(text));
}

/// Start the dialog worker. Only the first call gets a working worker: the request receiver can
/// only be taken once.
pub fn spawn_worker() -> DialogWorker {
    let dialog_request_receiver = DIALOG_REQUEST_CHANNEL.1.lock()
        .ok()
        .and_then(|mut receiver| receiver.take());

    let Some(dialog_request_receiver) = dialog_request_receiver else {
        debug_eprintln!("dialog worker was already spawned");
        return DialogWorker { join_handle: None };
    };

    // native dialogs block a thread, so we'll spin up a single thread to loop through queued dialogs.
    // If we ever need to show multiple dialogs, they just get queued.
    let join_handle = std::thread::Builder::new()
        .name("dialog-worker".to_string())
        .spawn(move || {
            // block waiting for a request; a closed channel also ends the worker
            while let Ok(request) = dialog_request_receiver.recv() {
                let Some((message_type, text)) = request.into_dialog() else {
                    break;
                };
                let result = MessageDialog::new()
                    .set_type(message_type)
                    .set_title(DIALOG_TITLE)
                    .set_text(&text)
                    .show_alert();
                if let Err(e) = result {
                    debug_eprintln!("failed to show dialog: {}", e);
                }
            }
        });

    match join_handle {
        Ok(join_handle) => DialogWorker {
            join_handle: Some(join_handle), // we take() from this later
        },
        Err(e) => {
            debug_eprintln!("failed to spawn dialog worker: {}", e);
            DialogWorker { join_handle: None }
        }
    }
}
