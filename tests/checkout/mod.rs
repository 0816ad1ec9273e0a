mod checkout_blocked_by_untracked_file;
mod checkout_current_branch_fails;
mod checkout_file_from_commit;
mod checkout_file_from_head;
