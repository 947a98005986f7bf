use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::error::{AppError, AppResult};

use super::ReportArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<ReportArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Ok(parse_test_matches(args)?.0)
}

pub(crate) fn parse_test_matches<I, T>(args: I) -> AppResult<(ReportArgs, ArgMatches)>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = ReportArgs::command()
        .try_get_matches_from(args)
        .map_err(AppError::from)?;
    let args = ReportArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}
