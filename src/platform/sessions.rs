use crate::error::Result;

#[cfg(any(target_os = "linux", target_os = "macos"))]
use crate::error::MotdError;

#[cfg(target_os = "linux")]
const UTMP_PATH: &str = "/var/run/utmp";

#[cfg(target_os = "macos")]
const UTMP_PATH: &str = "/var/run/utmpx";

/// User name of every USER_PROCESS entry in the utmpx database
#[cfg(any(target_os = "linux", target_os = "macos"))]
pub fn logged_in_users() -> Result<Vec<String>> {
    // getutxent silently yields nothing without a database (containers)
    if !std::path::Path::new(UTMP_PATH).exists() {
        return Err(MotdError::collection(format!("{} does not exist", UTMP_PATH)));
    }

    let mut users = Vec::new();

    // SAFETY: the utmpx cursor is process-global and not thread-safe; the
    // collectors run on a single thread and every entry is copied out before
    // the next getutxent call.
    unsafe {
        libc::setutxent();
        loop {
            let entry = libc::getutxent();
            if entry.is_null() {
                break;
            }
            let entry = &*entry;
            if entry.ut_type != libc::USER_PROCESS {
                continue;
            }
            let name: Vec<u8> = entry
                .ut_user
                .iter()
                .take_while(|&&c| c != 0)
                .map(|&c| c as u8)
                .collect();
            if !name.is_empty() {
                users.push(String::from_utf8_lossy(&name).into_owned());
            }
        }
        libc::endutxent();
    }

    Ok(users)
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn logged_in_users() -> Result<Vec<String>> {
    Err(crate::error::MotdError::unsupported("session table"))
}
