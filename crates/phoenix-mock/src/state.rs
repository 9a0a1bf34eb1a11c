//! Scriptable state behind the mock exports.
//!
//! Each test thread gets its own [`MockSession`]. A handle remembers the
//! session that created it, so a device moved to another thread keeps
//! reporting into the session of the test that opened it.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::ffi::{c_int, c_void};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use ctre_phoenix_sys::{Handle, status};
use parking_lot::Mutex;

/// One argument as it crossed the mock ABI.
#[derive(Debug, Clone, Copy)]
pub enum MockArg {
    /// A `c_int` argument.
    Int(i32),
    /// A `double` argument.
    Double(f64),
    /// A `bool` argument.
    Bool(bool),
}

impl PartialEq for MockArg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            // Bit equality: forwarding must not alter a double in any way.
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i32> for MockArg {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for MockArg {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for MockArg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl fmt::Display for MockArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// A recorded call, excluding the handle argument.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Exported symbol that was called.
    pub function: &'static str,
    /// Numeric handle the call was made with; zero for create.
    pub handle: usize,
    /// Remaining arguments in declaration order, out-pointers omitted.
    pub args: Vec<MockArg>,
}

impl fmt::Display for MockCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.function)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

enum CreateScript {
    Fail(i32),
    Null,
}

/// Points the mock's top-level motion profile buffer holds.
pub const MOTION_PROFILE_CAPACITY: i32 = 2048;

/// Fields of a pushed point that the status call reports back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PushedPoint {
    pub(crate) slot0: i32,
    pub(crate) slot1: i32,
    pub(crate) is_last: bool,
    pub(crate) duration_ms: i32,
}

/// Two-level motion profile buffer of one device.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct MotionProfile {
    pub(crate) top: i32,
    pub(crate) bottom: i32,
    pub(crate) has_underrun: bool,
    pub(crate) active: Option<PushedPoint>,
    newest: Option<PushedPoint>,
}

impl MotionProfile {
    pub(crate) fn push(&mut self, point: PushedPoint) -> c_int {
        if self.top >= MOTION_PROFILE_CAPACITY {
            return status::BUFFER_FULL;
        }
        self.top += 1;
        self.newest = Some(point);
        status::OK
    }

    /// Move the top buffer down. Processing with nothing buffered latches an underrun.
    pub(crate) fn process(&mut self) {
        if self.top == 0 {
            if self.bottom == 0 {
                self.has_underrun = true;
            }
            return;
        }
        self.bottom += self.top;
        self.top = 0;
        self.active = self.newest;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self {
            has_underrun: self.has_underrun,
            ..Self::default()
        };
    }

    pub(crate) fn is_underrun(&self) -> bool {
        self.has_underrun && self.bottom == 0
    }
}

pub(crate) struct DeviceState {
    base_arb_id: i32,
    last_error: i32,
    stored: HashMap<(&'static str, i32), f64>,
    pub(crate) motion_profile: MotionProfile,
}

impl DeviceState {
    /// Make a getter report `value` for `key` on this device.
    pub(crate) fn store(&mut self, getter: &'static str, key: i32, value: f64) {
        self.stored.insert((getter, key), value);
    }
}

#[derive(Default)]
struct SessionState {
    next_handles: VecDeque<usize>,
    create_scripts: VecDeque<CreateScript>,
    statuses: HashMap<&'static str, i32>,
    values: HashMap<&'static str, f64>,
    opens: usize,
    closes: usize,
    calls: Vec<MockCall>,
    devices: HashMap<usize, DeviceState>,
}

type SharedState = Arc<Mutex<SessionState>>;

// Handles are spaced out so they never look like small integers.
static NEXT_HANDLE: AtomicUsize = AtomicUsize::new(0x1000);
static HANDLES: LazyLock<Mutex<HashMap<usize, SharedState>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

thread_local! {
    static CURRENT: RefCell<Option<MockSession>> = const { RefCell::new(None) };
}

/// Control and inspection of the mock library for the current thread.
#[derive(Clone)]
pub struct MockSession {
    state: SharedState,
}

impl MockSession {
    /// Start a fresh session for this thread, replacing any previous one.
    pub fn install() -> Self {
        let session = Self {
            state: Arc::new(Mutex::new(SessionState::default())),
        };
        CURRENT.with(|current| *current.borrow_mut() = Some(session.clone()));
        session
    }

    /// The session of this thread, installing one if there is none.
    pub fn current() -> Self {
        let existing = CURRENT.with(|current| current.borrow().clone());
        existing.unwrap_or_else(Self::install)
    }

    /// The next create call returns `handle` instead of an allocated one.
    pub fn set_next_handle(&self, handle: usize) {
        self.state.lock().next_handles.push_back(handle);
    }

    /// The next create call returns a live handle whose last error is `code`.
    pub fn fail_next_create(&self, code: i32) {
        self.state
            .lock()
            .create_scripts
            .push_back(CreateScript::Fail(code));
    }

    /// The next create call returns a null handle.
    pub fn null_next_create(&self) {
        self.state.lock().create_scripts.push_back(CreateScript::Null);
    }

    /// Every later call to `function` returns `code` until cleared.
    pub fn inject_status(&self, function: &'static str, code: i32) {
        self.state.lock().statuses.insert(function, code);
    }

    /// Stop injecting a status into `function`.
    pub fn clear_status(&self, function: &'static str) {
        self.state.lock().statuses.remove(function);
    }

    /// Value reported by the getter `function` on every device of this session.
    ///
    /// Integer and boolean getters convert the value; a setter on a device
    /// overrides it for that device.
    pub fn set_value(&self, function: &'static str, value: f64) {
        self.state.lock().values.insert(function, value);
    }

    /// Devices created so far, including failed creates that returned a handle.
    pub fn opens(&self) -> usize {
        self.state.lock().opens
    }

    /// Devices destroyed so far.
    pub fn closes(&self) -> usize {
        self.state.lock().closes
    }

    /// Handles created and not yet destroyed.
    pub fn live_handles(&self) -> Vec<usize> {
        let mut handles: Vec<_> = self.state.lock().devices.keys().copied().collect();
        handles.sort_unstable();
        handles
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    /// Recorded calls to `function`, oldest first.
    pub fn calls_to(&self, function: &str) -> Vec<MockCall> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.function == function)
            .cloned()
            .collect()
    }

    /// Number of destroy calls made for `handle`.
    pub fn destroy_count(&self, handle: usize) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|call| call.function == "c_MotController_Destroy" && call.handle == handle)
            .count()
    }

    /// Forget recorded calls, keeping devices and scripts.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

impl fmt::Debug for MockSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("MockSession")
            .field("opens", &state.opens)
            .field("closes", &state.closes)
            .field("live", &state.devices.len())
            .field("calls", &state.calls.len())
            .finish()
    }
}

fn session_for(handle: usize) -> Option<SharedState> {
    HANDLES.lock().get(&handle).cloned()
}

pub(crate) fn create(base_arb_id: c_int) -> Handle {
    let session = MockSession::current();
    let mut state = session.state.lock();
    state.calls.push(MockCall {
        function: "c_MotController_Create1",
        handle: 0,
        args: vec![MockArg::Int(base_arb_id)],
    });

    let last_error = match state.create_scripts.pop_front() {
        Some(CreateScript::Null) => return std::ptr::null_mut(),
        Some(CreateScript::Fail(code)) => code,
        None => status::OK,
    };

    let handle = state
        .next_handles
        .pop_front()
        .unwrap_or_else(|| NEXT_HANDLE.fetch_add(0x10, Ordering::Relaxed));
    let mut device = DeviceState {
        base_arb_id,
        last_error,
        stored: HashMap::new(),
        motion_profile: MotionProfile::default(),
    };
    device.store(
        "c_MotController_GetDeviceNumber",
        0,
        f64::from(device.base_arb_id & 0x3F),
    );
    state.devices.insert(handle, device);
    state.opens += 1;
    HANDLES.lock().insert(handle, Arc::clone(&session.state));

    std::ptr::without_provenance_mut::<c_void>(handle)
}

pub(crate) fn destroy(handle: Handle) -> c_int {
    let id = handle.addr();
    let Some(shared) = session_for(id) else {
        record_unknown(id, "c_MotController_Destroy", Vec::new());
        return status::INVALID_HANDLE;
    };
    let mut state = shared.lock();
    state.calls.push(MockCall {
        function: "c_MotController_Destroy",
        handle: id,
        args: Vec::new(),
    });
    if state.devices.remove(&id).is_none() {
        return status::INVALID_HANDLE;
    }
    state.closes += 1;
    HANDLES.lock().remove(&id);
    state
        .statuses
        .get("c_MotController_Destroy")
        .copied()
        .unwrap_or(status::OK)
}

pub(crate) fn last_error(handle: Handle) -> c_int {
    let id = handle.addr();
    session_for(id)
        .and_then(|shared| shared.lock().devices.get(&id).map(|d| d.last_error))
        .unwrap_or(status::INVALID_HANDLE)
}

fn record_unknown(handle: usize, function: &'static str, args: Vec<MockArg>) {
    MockSession::current().state.lock().calls.push(MockCall {
        function,
        handle,
        args,
    });
}

/// Record a call on a live device and run `apply` unless a status is injected.
pub(crate) fn call(
    handle: Handle,
    function: &'static str,
    args: Vec<MockArg>,
    apply: impl FnOnce(&mut DeviceState),
) -> c_int {
    call_status(handle, function, args, |device| {
        apply(device);
        status::OK
    })
}

/// Like [`call`], with `apply` choosing the status.
pub(crate) fn call_status(
    handle: Handle,
    function: &'static str,
    args: Vec<MockArg>,
    apply: impl FnOnce(&mut DeviceState) -> c_int,
) -> c_int {
    let id = handle.addr();
    let Some(shared) = session_for(id) else {
        record_unknown(id, function, args);
        return status::INVALID_HANDLE;
    };
    let mut state = shared.lock();
    state.calls.push(MockCall {
        function,
        handle: id,
        args,
    });
    let injected = state.statuses.get(function).copied();
    let Some(device) = state.devices.get_mut(&id) else {
        return status::INVALID_HANDLE;
    };
    let code = match injected {
        Some(code) => code,
        None => apply(device),
    };
    device.last_error = code;
    code
}

/// Record a getter call and return its status and value.
pub(crate) fn read(
    handle: Handle,
    function: &'static str,
    key: i32,
    args: Vec<MockArg>,
) -> (c_int, f64) {
    let code = call(handle, function, args, |_| ());
    if code != status::OK {
        return (code, 0.0);
    }
    (code, value(handle, function, key))
}

/// Value a getter reports, without recording a call.
pub(crate) fn value(handle: Handle, function: &'static str, key: i32) -> f64 {
    let id = handle.addr();
    session_for(id).map_or(0.0, |shared| {
        let state = shared.lock();
        state
            .devices
            .get(&id)
            .and_then(|device| device.stored.get(&(function, key)).copied())
            .or_else(|| state.values.get(function).copied())
            .unwrap_or(0.0)
    })
}

/// First integer argument, used to key per-index getters.
pub(crate) fn key_of(args: &[MockArg]) -> i32 {
    match args.first() {
        Some(MockArg::Int(key)) => *key,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_starts_empty() {
        let session = MockSession::install();
        assert_eq!(session.opens(), 0);
        assert_eq!(session.closes(), 0);
        assert!(session.calls().is_empty());
    }

    #[test]
    fn test_create_and_destroy_balance() {
        let session = MockSession::install();
        let handle = create(0x0204_0001);
        assert!(!handle.is_null());
        assert_eq!(session.live_handles(), vec![handle.addr()]);
        assert_eq!(destroy(handle), status::OK);
        assert_eq!(destroy(handle), status::INVALID_HANDLE);
        assert_eq!(session.opens(), 1);
        assert_eq!(session.closes(), 1);
        assert_eq!(session.destroy_count(handle.addr()), 2);
    }

    #[test]
    fn test_scripted_create() {
        let session = MockSession::install();
        session.null_next_create();
        assert!(create(1).is_null());
        assert_eq!(session.opens(), 0);

        session.set_next_handle(0x4242);
        session.fail_next_create(status::TX_FAILED);
        let handle = create(1);
        assert_eq!(handle.addr(), 0x4242);
        assert_eq!(last_error(handle), status::TX_FAILED);
        assert_eq!(destroy(handle), status::OK);
    }

    #[test]
    fn test_injected_status_skips_apply() {
        let session = MockSession::install();
        let handle = create(2);
        session.inject_status("c_MotController_SetQuadraturePosition", status::RX_TIMEOUT);
        let code = call(handle, "c_MotController_SetQuadraturePosition", vec![], |_| {
            panic!("apply must not run while a status is injected")
        });
        assert_eq!(code, status::RX_TIMEOUT);
        assert_eq!(last_error(handle), status::RX_TIMEOUT);
        assert_eq!(destroy(handle), status::OK);
    }

    #[test]
    fn test_read_prefers_device_value() {
        let session = MockSession::install();
        let handle = create(0x0204_0007);
        session.set_value("c_MotController_GetBusVoltage", 12.5);
        assert_eq!(read(handle, "c_MotController_GetBusVoltage", 0, vec![]), (0, 12.5));
        assert_eq!(read(handle, "c_MotController_GetDeviceNumber", 0, vec![]), (0, 7.0));
        assert_eq!(destroy(handle), status::OK);
    }

    #[test]
    fn test_unknown_handle_is_invalid() {
        let _session = MockSession::install();
        let bogus = std::ptr::without_provenance_mut::<c_void>(0x10);
        assert_eq!(last_error(bogus), status::INVALID_HANDLE);
        assert_eq!(call(bogus, "c_MotController_Set_4", vec![], |_| ()), status::INVALID_HANDLE);
    }

    fn point(is_last: bool) -> PushedPoint {
        PushedPoint {
            slot0: 0,
            slot1: 1,
            is_last,
            duration_ms: 10,
        }
    }

    #[test]
    fn test_motion_profile_moves_points_down() {
        let mut profile = MotionProfile::default();
        assert_eq!(profile.push(point(false)), status::OK);
        assert_eq!(profile.push(point(true)), status::OK);
        assert_eq!(profile.top, 2);
        assert!(profile.active.is_none());

        profile.process();
        assert_eq!((profile.top, profile.bottom), (0, 2));
        assert_eq!(profile.active, Some(point(true)));
        assert!(!profile.has_underrun);
    }

    #[test]
    fn test_motion_profile_underrun_survives_clear() {
        let mut profile = MotionProfile::default();
        profile.process();
        assert!(profile.has_underrun);
        assert!(profile.is_underrun());

        profile.clear();
        assert!(profile.has_underrun);
        assert_eq!(profile.bottom, 0);
    }

    #[test]
    fn test_motion_profile_rejects_push_when_full() {
        let mut profile = MotionProfile {
            top: MOTION_PROFILE_CAPACITY,
            ..MotionProfile::default()
        };
        assert_eq!(profile.push(point(false)), status::BUFFER_FULL);
        assert_eq!(profile.top, MOTION_PROFILE_CAPACITY);
    }

    #[test]
    fn test_call_display() {
        let call = MockCall {
            function: "c_MotController_Set_4",
            handle: 0x1000,
            args: vec![MockArg::Int(0), MockArg::Double(0.5), MockArg::Double(0.0), MockArg::Int(0)],
        };
        assert_eq!(call.to_string(), "c_MotController_Set_4(0, 0.5, 0.0, 0)");
    }

    #[test]
    fn test_double_args_compare_by_bits() {
        assert_eq!(MockArg::Double(f64::NAN), MockArg::Double(f64::NAN));
        assert_ne!(MockArg::Double(0.0), MockArg::Double(-0.0));
    }
}
