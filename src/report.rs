//! Plain-text views of a decoded record for the `dump` command.
//!
//! Each view is a thin `Display` wrapper over a borrowed record, so the
//! binary can print any combination without intermediate buffers.

use std::fmt;

use crate::legacy::restrict::RestrictionFlags;
use crate::legacy::ConfigRecord;

fn yes_no(v: u8) -> &'static str {
    if v != 0 {
        "yes"
    } else {
        "no"
    }
}

/// One-screen overview: identity, access policy, directories, modem, and
/// user-file geometry.
pub struct Summary<'a>(pub &'a ConfigRecord);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rec = self.0;
        writeln!(f, "System name      : {}", rec.system_name)?;
        writeln!(f, "System phone     : {}", rec.system_phone)?;
        writeln!(f, "Sysop name       : {}", rec.sysop_name)?;
        writeln!(f, "Node number      : {}", rec.system_number)?;
        writeln!(f, "Registration     : {}", rec.wwiv_reg_number)?;
        writeln!(f, "Closed system    : {}", yes_no(rec.closed_system))?;
        writeln!(f, "Max users        : {}", rec.max_users)?;
        writeln!(f, "Max mail waiting : {}", rec.max_waiting)?;
        writeln!(
            f,
            "New user SL/DSL  : {}/{}",
            rec.new_user_sl, rec.new_user_dsl
        )?;
        writeln!(
            f,
            "New user restrict: [{}]",
            RestrictionFlags::from_mask(rec.new_user_restrict)
        )?;
        writeln!(f, "New user gold    : {:.1}", rec.new_user_gold)?;
        writeln!(f, "Required ratio   : {:.3}", rec.req_ratio)?;
        writeln!(f)?;
        writeln!(f, "Messages dir     : {}", rec.msgs_dir)?;
        writeln!(f, "GFiles dir       : {}", rec.gfiles_dir)?;
        writeln!(f, "Data dir         : {}", rec.data_dir)?;
        writeln!(f, "Downloads dir    : {}", rec.dloads_dir)?;
        writeln!(f, "Temp dir         : {}", rec.temp_dir)?;
        writeln!(f, "Batch dir        : {}", rec.batch_dir)?;
        writeln!(f, "Menu dir         : {}", rec.menu_dir)?;
        writeln!(f)?;
        writeln!(f, "Modem type       : {}", rec.modem_type)?;
        writeln!(f, "Modem init       : {}", rec.modem_init)?;
        writeln!(f, "Modem answer     : {}", rec.modem_answer)?;
        writeln!(
            f,
            "Primary port     : COM{} at {} baud",
            rec.primary_port, rec.baud_rate[rec.primary_port as usize % rec.baud_rate.len()]
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "User record      : {} bytes, status at {}, mail counter at {}",
            rec.user_rec_len, rec.sysstatus_offset, rec.waiting_offset
        )?;
        writeln!(
            f,
            "Areas            : {} subs, {} dirs, {}-byte qscan block",
            rec.max_subs, rec.max_dirs, rec.qscan_len
        )
    }
}

/// The full 256-row security level table.
pub struct SecurityLevels<'a>(pub &'a ConfigRecord);

impl fmt::Display for SecurityLevels<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            " SL  Time/Call  Time/Day  Msgs/Read  Emails  Posts  Ability"
        )?;
        for (i, level) in self.0.sl.iter().enumerate() {
            writeln!(
                f,
                "{:>3}  {:>9}  {:>8}  {:>9}  {:>6}  {:>5}  {:>7}",
                i,
                level.time_per_logon,
                level.time_per_day,
                level.messages_read,
                level.emails,
                level.posts,
                format!("{:04X}", level.ability)
            )?;
        }
        Ok(())
    }
}

/// The four archiver slots with their command lines.
pub struct Archivers<'a>(pub &'a ConfigRecord);

impl fmt::Display for Archivers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.0.arcs.iter().enumerate() {
            if arc.extension.is_empty() {
                writeln!(f, "Slot {}: (unused)", i + 1)?;
                continue;
            }
            writeln!(f, "Slot {}: {}", i + 1, arc.extension)?;
            writeln!(f, "  add    : {}", arc.add_command)?;
            writeln!(f, "  extract: {}", arc.extract_command)?;
            writeln!(f, "  list   : {}", arc.list_command)?;
        }
        Ok(())
    }
}
