pub trait ResultExt<T, E> {
	/// Logs the error, if any, and carries on without the value.
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
	fn ok_or_log(self) -> Option<T>
	where
		E: std::fmt::Display,
	{
		self.inspect_err(|err| tracing::error!(%err, "recovered from error")).ok()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ok_or_log() {
		assert_eq!(Ok::<_, String>(3).ok_or_log(), Some(3));
		assert_eq!(Err::<i32, _>("no journal".to_string()).ok_or_log(), None);
	}
}
