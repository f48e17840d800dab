use std::sync::atomic::{AtomicBool,Ordering};

use nix::sys::signal::{sigaction,SaFlags,SigAction,SigHandler,SigSet,Signal};

static PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn on_interrupt(_: libc::c_int) {
	PENDING.store(true, Ordering::SeqCst);
}

/// Proof that the SIGINT handler is installed. The handler only records
/// that an interrupt happened; whoever holds this value decides what the
/// shell does about it.
#[derive(Debug)]
pub struct Interrupts {
	_installed: (),
}

impl Interrupts {
	/// Installs the handler without `SA_RESTART`, so a blocking read of the
	/// next line returns `EINTR` and the prompt can be redrawn.
	pub fn install() -> nix::Result<Interrupts> {
		let action = SigAction::new(SigHandler::Handler(on_interrupt), SaFlags::empty(), SigSet::empty());
		unsafe {
			sigaction(Signal::SIGINT, &action)?;
		}
		Ok(Interrupts { _installed: () })
	}

	/// Returns whether an interrupt arrived since the last call.
	pub fn take(&self) -> bool {
		PENDING.swap(false, Ordering::SeqCst)
	}
}
