//! SAA REXX application programming interface: C types and typed entry
//! points.
//!
//! Layouts follow the `rexxsaa.h` shipped by Regina and ooRexx for 64-bit
//! builds, where `strlength` and the variable-pool length fields are
//! pointer-sized.

use std::ffi::{c_char, c_long, c_short, c_uchar, c_ulong, c_ushort, c_void};

use hrexx_core::registry::{
    REXX_ALLOCATE_MEMORY, REXX_DEREGISTER_EXIT, REXX_DEREGISTER_SUBCOM, REXX_FREE_MEMORY,
    REXX_REGISTER_EXIT, REXX_REGISTER_SUBCOM, REXX_START, REXX_VARIABLE_POOL,
};

use crate::handle::SymbolTable;

pub type ApiRet = c_ulong;

/// `RexxStart` call types.
pub const RXCOMMAND: c_long = 0;
pub const RXSUBROUTINE: c_long = 1;
pub const RXFUNCTION: c_long = 2;

/// Subcommand handler return flags.
pub const RXSUBCOM_OK: c_ushort = 0;
pub const RXSUBCOM_ERROR: c_ushort = 1;
pub const RXSUBCOM_FAILURE: c_ushort = 2;

/// Exit codes.
pub const RXENDLST: c_long = 0;
pub const RXSIO: c_long = 10;
pub const RXSIOSAY: c_long = 1;
pub const RXSIOTRC: c_long = 2;
pub const RXSIOTRD: c_long = 3;
pub const RXSIODTR: c_long = 4;
pub const RXEXIT_HANDLED: c_long = 0;
pub const RXEXIT_NOT_HANDLED: c_long = 1;

/// Variable pool request codes.
pub const RXSHV_SET: c_uchar = 0x00;
pub const RXSHV_FETCH: c_uchar = 0x01;
pub const RXSHV_DROPV: c_uchar = 0x02;
pub const RXSHV_SYSET: c_uchar = 0x03;
pub const RXSHV_SYFET: c_uchar = 0x04;
pub const RXSHV_SYDRO: c_uchar = 0x05;
pub const RXSHV_NEXTV: c_uchar = 0x06;

/// Counted string passed across the API.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RxString {
    pub strlength: usize,
    pub strptr: *mut c_char,
}

impl RxString {
    /// The null string (`RXNULLSTRING`).
    #[must_use]
    pub const fn null() -> Self {
        Self {
            strlength: 0,
            strptr: std::ptr::null_mut(),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.strptr.is_null()
    }

    /// View the string's bytes.
    ///
    /// # Safety
    ///
    /// `strptr` must point to at least `strlength` readable bytes that stay
    /// valid for the returned lifetime.
    #[must_use]
    pub unsafe fn as_bytes(&self) -> &[u8] {
        if self.strptr.is_null() {
            return &[];
        }
        // SAFETY: guaranteed by the caller.
        unsafe { std::slice::from_raw_parts(self.strptr.cast::<u8>(), self.strlength) }
    }
}

/// One entry of the exit list passed to `RexxStart`.
///
/// The code is a C `long`, the width Regina declares; ooRexx reads the low
/// `int` of it.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RxSysExit {
    pub sysexit_name: *const c_char,
    pub sysexit_code: c_long,
}

/// Variable pool request block.
#[repr(C)]
#[derive(Debug)]
pub struct ShvBlock {
    pub shvnext: *mut ShvBlock,
    pub shvname: RxString,
    pub shvvalue: RxString,
    pub shvnamelen: usize,
    pub shvvaluelen: usize,
    pub shvcode: c_uchar,
    pub shvret: c_uchar,
}

pub type RexxSubcomHandler = unsafe extern "system" fn(
    command: *mut RxString,
    flags: *mut c_ushort,
    retstr: *mut RxString,
) -> ApiRet;

pub type RexxExitHandler = unsafe extern "system" fn(
    exit_number: c_long,
    subfunction: c_long,
    params: *mut c_void,
) -> c_long;

pub type RexxStartFn = unsafe extern "system" fn(
    argc: c_long,
    argv: *mut RxString,
    name: *const c_char,
    instore: *mut RxString,
    envname: *const c_char,
    call_type: c_long,
    exits: *mut RxSysExit,
    retc: *mut c_short,
    result: *mut RxString,
) -> c_long;

pub type RexxRegisterSubcomExeFn = unsafe extern "system" fn(
    name: *const c_char,
    handler: RexxSubcomHandler,
    user_area: *mut c_uchar,
) -> ApiRet;

pub type RexxDeregisterSubcomFn =
    unsafe extern "system" fn(name: *const c_char, module: *const c_char) -> ApiRet;

pub type RexxRegisterExitExeFn = unsafe extern "system" fn(
    name: *const c_char,
    handler: RexxExitHandler,
    user_area: *mut c_uchar,
) -> ApiRet;

pub type RexxDeregisterExitFn =
    unsafe extern "system" fn(name: *const c_char, module: *const c_char) -> ApiRet;

pub type RexxAllocateMemoryFn = unsafe extern "system" fn(size: usize) -> *mut c_void;

pub type RexxFreeMemoryFn = unsafe extern "system" fn(memory: *mut c_void) -> ApiRet;

pub type RexxVariablePoolFn = unsafe extern "system" fn(request: *mut ShvBlock) -> ApiRet;

/// The resolved API of one bound runtime.
#[derive(Debug, Clone, Copy)]
pub struct RexxEntryPoints {
    pub start: RexxStartFn,
    pub register_subcom: RexxRegisterSubcomExeFn,
    pub deregister_subcom: RexxDeregisterSubcomFn,
    pub register_exit: RexxRegisterExitExeFn,
    pub deregister_exit: RexxDeregisterExitFn,
    pub allocate_memory: RexxAllocateMemoryFn,
    pub free_memory: RexxFreeMemoryFn,
    pub variable_pool: RexxVariablePoolFn,
}

impl RexxEntryPoints {
    /// Typed view of `table`. `None` if any API symbol is missing.
    ///
    /// # Safety
    ///
    /// Each symbol in `table` must be a function with the SAA signature its
    /// name implies, and the library must stay loaded while the returned
    /// pointers are used.
    #[must_use]
    pub unsafe fn from_table(table: &SymbolTable) -> Option<Self> {
        // SAFETY (all transmutes): caller guarantees the signatures; the
        // addresses are non-null code pointers from the loader.
        unsafe {
            Some(Self {
                start: std::mem::transmute::<*mut c_void, RexxStartFn>(
                    table.get(REXX_START)?.as_ptr(),
                ),
                register_subcom: std::mem::transmute::<*mut c_void, RexxRegisterSubcomExeFn>(
                    table.get(REXX_REGISTER_SUBCOM)?.as_ptr(),
                ),
                deregister_subcom: std::mem::transmute::<*mut c_void, RexxDeregisterSubcomFn>(
                    table.get(REXX_DEREGISTER_SUBCOM)?.as_ptr(),
                ),
                register_exit: std::mem::transmute::<*mut c_void, RexxRegisterExitExeFn>(
                    table.get(REXX_REGISTER_EXIT)?.as_ptr(),
                ),
                deregister_exit: std::mem::transmute::<*mut c_void, RexxDeregisterExitFn>(
                    table.get(REXX_DEREGISTER_EXIT)?.as_ptr(),
                ),
                allocate_memory: std::mem::transmute::<*mut c_void, RexxAllocateMemoryFn>(
                    table.get(REXX_ALLOCATE_MEMORY)?.as_ptr(),
                ),
                free_memory: std::mem::transmute::<*mut c_void, RexxFreeMemoryFn>(
                    table.get(REXX_FREE_MEMORY)?.as_ptr(),
                ),
                variable_pool: std::mem::transmute::<*mut c_void, RexxVariablePoolFn>(
                    table.get(REXX_VARIABLE_POOL)?.as_ptr(),
                ),
            })
        }
    }
}
