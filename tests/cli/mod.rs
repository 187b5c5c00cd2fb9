mod checkpoint_lifecycle_contract;
mod pillow_contract;
mod pip_command_contract;
mod tag_contract;
