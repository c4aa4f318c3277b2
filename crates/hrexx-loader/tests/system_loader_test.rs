//! Integration test: platform loader against the real system C library.
//!
//! The C library stands in for a runtime: it is always installed, exports
//! well-known symbols, and exports none of the SAA REXX API.
//!
//! Run: cargo test -p hrexx-loader --test system_loader_test

#![cfg(target_os = "linux")]

use hrexx_core::dlfcn::LoadFlags;
use hrexx_core::message::MessageCode;
use hrexx_core::registry::RuntimeEntry;
use hrexx_loader::{Binder, LibraryHandle, LoaderError, SystemLoader};

const LIBC: &str = "libc.so.6";

fn libc_present() -> bool {
    let present = LibraryHandle::open(&SystemLoader, "libc", LIBC, LoadFlags::NOW)
        .and_then(|mut handle| handle.close(&SystemLoader))
        .is_ok();
    if !present {
        eprintln!("Skipping: {LIBC} not loadable on this host");
    }
    present
}

#[test]
fn open_nonexistent_library_fails() {
    let err = LibraryHandle::open(
        &SystemLoader,
        "Regina",
        "/nonexistent/hrexx/libregina.so",
        LoadFlags::NOW,
    )
    .unwrap_err();
    match &err {
        LoaderError::LibraryOpen {
            package, library, ..
        } => {
            assert_eq!(package, "Regina");
            assert_eq!(library, "/nonexistent/hrexx/libregina.so");
        }
        other => panic!("expected LibraryOpen, got {other:?}"),
    }
    assert_eq!(err.code(), MessageCode::Hhc17531);
}

#[test]
fn empty_name_does_not_open_the_main_program() {
    let err = LibraryHandle::open(&SystemLoader, "A", "", LoadFlags::NOW).unwrap_err();
    assert!(matches!(err, LoaderError::LibraryOpen { .. }));

    let entry = RuntimeEntry::new("A", "", &["strlen", "malloc"]);
    let failure = Binder::new().bind(&entry).unwrap_err();
    assert_eq!(failure.error.code(), MessageCode::Hhc17531);
    assert!(failure.error.symbol().is_none());
}

#[test]
fn binding_moves_to_another_thread() {
    if !libc_present() {
        return;
    }
    let entry = RuntimeEntry::new("A", LIBC, &["strlen"]);
    let binding = Binder::new().bind(&entry).unwrap();
    let shared = std::sync::Mutex::new(binding);

    std::thread::scope(|s| {
        s.spawn(|| {
            let mut binding = shared.lock().unwrap();
            assert!(binding.symbols().get("strlen").is_some());
            binding.teardown().unwrap();
        });
    });
    assert!(!shared.lock().unwrap().is_bound());
}

#[test]
fn resolve_present_and_absent_symbols() {
    if !libc_present() {
        return;
    }
    let mut handle = LibraryHandle::open(&SystemLoader, "libc", LIBC, LoadFlags::LAZY).unwrap();
    let strlen = handle.resolve(&SystemLoader, "strlen").unwrap();
    assert_ne!(strlen.addr(), 0);

    let err = handle.resolve(&SystemLoader, "RexxStart").unwrap_err();
    assert_eq!(err.symbol(), Some("RexxStart"));
    assert!(!err.diagnostic().message.is_empty());

    handle.close(&SystemLoader).unwrap();
}

#[test]
fn close_twice_fails_the_second_time() {
    if !libc_present() {
        return;
    }
    let mut handle = LibraryHandle::open(&SystemLoader, "libc", LIBC, LoadFlags::NOW).unwrap();
    assert!(handle.close(&SystemLoader).is_ok());
    let err = handle.close(&SystemLoader).unwrap_err();
    assert!(matches!(err, LoaderError::LibraryClose { .. }));
}

#[test]
fn bind_library_missing_one_symbol() {
    if !libc_present() {
        return;
    }
    let entry = RuntimeEntry::new("A", LIBC, &["strlen", "malloc", "RexxVariablePool"]);
    let failure = Binder::new().bind(&entry).unwrap_err();

    assert_eq!(failure.error.symbol(), Some("RexxVariablePool"));
    assert!(failure.cleanup.is_none(), "cleanup close should succeed");
    let reports = failure.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].code, MessageCode::Hhc17533);
    assert_eq!(reports[0].package, "A");
}

#[test]
fn bind_and_teardown_libc_subset() {
    if !libc_present() {
        return;
    }
    let entry = RuntimeEntry::new("A", LIBC, &["strlen", "malloc", "free"]);
    let mut binding = Binder::new().bind(&entry).unwrap();
    assert_eq!(binding.symbols().len(), 3);
    assert!(binding.symbols().get("malloc").is_some());

    binding.teardown().unwrap();
    assert!(binding.teardown().is_err());
}
